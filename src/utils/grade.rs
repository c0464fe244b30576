//! 成绩计算
//!
//! 百分比保留两位小数；等级阈值固定：
//! - A: 90 及以上
//! - B: 80 及以上
//! - C: 70 及以上
//! - D: 60 及以上
//! - F: 60 以下

use crate::models::students::entities::{Grade, Mark};

/// 汇总结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultSummary {
    pub total_obtained: f64,
    pub total_max: f64,
    pub percentage: f64,
    pub grade: Grade,
}

/// 计算百分比，满分为 0 时返回 0
pub fn calculate_percentage(marks_obtained: f64, max_marks: f64) -> f64 {
    if max_marks == 0.0 {
        return 0.0;
    }
    (marks_obtained / max_marks * 100.0 * 100.0).round() / 100.0
}

/// 根据百分比计算等级
pub fn calculate_grade(percentage: f64) -> Grade {
    if percentage >= 90.0 {
        Grade::A
    } else if percentage >= 80.0 {
        Grade::B
    } else if percentage >= 70.0 {
        Grade::C
    } else if percentage >= 60.0 {
        Grade::D
    } else {
        Grade::F
    }
}

/// 汇总一个学生的全部成绩
pub fn summarize(marks: &[Mark]) -> ResultSummary {
    let (total_obtained, total_max) = marks.iter().fold((0.0, 0.0), |(obtained, max), mark| {
        (obtained + mark.marks_obtained, max + mark.max_marks)
    });
    let percentage = calculate_percentage(total_obtained, total_max);

    ResultSummary {
        total_obtained,
        total_max,
        percentage,
        grade: calculate_grade(percentage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark(subject: &str, marks_obtained: f64, max_marks: f64) -> Mark {
        Mark {
            subject: subject.to_string(),
            marks_obtained,
            max_marks,
        }
    }

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(calculate_grade(100.0), Grade::A);
        assert_eq!(calculate_grade(90.0), Grade::A);
        assert_eq!(calculate_grade(89.99), Grade::B);
        assert_eq!(calculate_grade(85.0), Grade::B);
        assert_eq!(calculate_grade(80.0), Grade::B);
        assert_eq!(calculate_grade(70.0), Grade::C);
        assert_eq!(calculate_grade(69.5), Grade::D);
        assert_eq!(calculate_grade(60.0), Grade::D);
        assert_eq!(calculate_grade(59.99), Grade::F);
        assert_eq!(calculate_grade(0.0), Grade::F);
    }

    #[test]
    fn test_percentage_rounds_to_two_decimals() {
        assert_eq!(calculate_percentage(85.0, 100.0), 85.0);
        assert_eq!(calculate_percentage(1.0, 3.0), 33.33);
        assert_eq!(calculate_percentage(2.0, 3.0), 66.67);
        assert_eq!(calculate_percentage(199.0, 300.0), 66.33);
    }

    #[test]
    fn test_percentage_zero_max() {
        assert_eq!(calculate_percentage(10.0, 0.0), 0.0);
        assert_eq!(calculate_percentage(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_percentage_can_exceed_hundred() {
        // 不强制 marks_obtained <= max_marks
        assert_eq!(calculate_percentage(120.0, 100.0), 120.0);
        assert_eq!(calculate_grade(120.0), Grade::A);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_obtained, 0.0);
        assert_eq!(summary.total_max, 0.0);
        assert_eq!(summary.percentage, 0.0);
        assert_eq!(summary.grade, Grade::F);
    }

    #[test]
    fn test_summarize_mixed_max_marks() {
        let marks = vec![
            mark("Math", 45.0, 50.0),
            mark("Physics", 70.0, 100.0),
            mark("Chemistry", 80.0, 100.0),
        ];
        let summary = summarize(&marks);
        assert_eq!(summary.total_obtained, 195.0);
        assert_eq!(summary.total_max, 250.0);
        assert_eq!(summary.percentage, 78.0);
        assert_eq!(summary.grade, Grade::C);
    }
}
