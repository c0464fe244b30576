use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建学生表
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::Name).string().not_null())
                    .col(
                        ColumnDef::new(Students::RollNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Students::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建科目表
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subjects::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Subjects::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建成绩表（学生与科目的关联）
        manager
            .create_table(
                Table::create()
                    .table(Marks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Marks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Marks::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Marks::SubjectId).big_integer().not_null())
                    .col(ColumnDef::new(Marks::MarksObtained).double().not_null())
                    .col(
                        ColumnDef::new(Marks::MaxMarks)
                            .double()
                            .not_null()
                            .default(100.0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Marks::Table, Marks::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Marks::Table, Marks::SubjectId)
                            .to(Subjects::Table, Subjects::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 每个学生每个科目只能有一条成绩
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_marks_student_subject")
                    .table(Marks::Table)
                    .col(Marks::StudentId)
                    .col(Marks::SubjectId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_marks_subject_id")
                    .table(Marks::Table)
                    .col(Marks::SubjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_name")
                    .table(Students::Table)
                    .col(Students::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Marks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    Name,
    RollNumber,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Subjects {
    #[sea_orm(iden = "subjects")]
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Marks {
    #[sea_orm(iden = "marks")]
    Table,
    Id,
    StudentId,
    SubjectId,
    MarksObtained,
    MaxMarks,
}
