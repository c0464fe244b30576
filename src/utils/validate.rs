use std::collections::HashSet;

use crate::models::students::requests::MarkInput;

const MAX_NAME_LEN: usize = 100;
const MAX_ROLL_NUMBER_LEN: usize = 100;

pub fn validate_student_name(name: &str) -> Result<(), &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Name must not be empty");
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err("Name must be at most 100 characters");
    }
    Ok(())
}

pub fn validate_roll_number(roll_number: &str) -> Result<(), &'static str> {
    let roll_number = roll_number.trim();
    if roll_number.is_empty() {
        return Err("Roll number must not be empty");
    }
    if roll_number.chars().count() > MAX_ROLL_NUMBER_LEN {
        return Err("Roll number must be at most 100 characters");
    }
    Ok(())
}

pub fn validate_subject_name(subject: &str) -> Result<(), &'static str> {
    let subject = subject.trim();
    if subject.is_empty() {
        return Err("Subject name must not be empty");
    }
    if subject.chars().count() > MAX_NAME_LEN {
        return Err("Subject name must be at most 100 characters");
    }
    Ok(())
}

/// 校验一组成绩输入
///
/// 同一科目在一次请求中只能出现一次（对应 marks 表的 (student_id, subject_id) 唯一约束）。
/// 不要求 marks_obtained <= max_marks。
pub fn validate_marks(marks: &[MarkInput]) -> Result<(), String> {
    let mut seen = HashSet::with_capacity(marks.len());

    for mark in marks {
        validate_subject_name(&mark.subject).map_err(str::to_string)?;

        if !mark.marks_obtained.is_finite() || mark.marks_obtained < 0.0 {
            return Err(format!(
                "marks_obtained for '{}' must be a non-negative number",
                mark.subject.trim()
            ));
        }

        if let Some(max) = mark.max_marks
            && (!max.is_finite() || max < 0.0)
        {
            return Err(format!(
                "max_marks for '{}' must be a non-negative number",
                mark.subject.trim()
            ));
        }

        if !seen.insert(mark.subject.trim()) {
            return Err(format!("Duplicate subject '{}' in marks", mark.subject.trim()));
        }
    }

    Ok(())
}
