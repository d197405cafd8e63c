/// Letter grade displayed next to a percentage. Grades only apply to
/// completed attempts; anything else reads "N/A" regardless of percentage.
/// Thresholds mirror the backend's marking bands.
pub fn letter_grade(percentage: f64, status: &str) -> &'static str {
    if status != "completed" {
        return "N/A";
    }
    if percentage >= 90.0 {
        "A"
    } else if percentage >= 80.0 {
        "B"
    } else if percentage >= 70.0 {
        "C"
    } else if percentage >= 60.0 {
        "D"
    } else {
        "F"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_attempts_use_the_banding() {
        assert_eq!(letter_grade(92.0, "completed"), "A");
        assert_eq!(letter_grade(90.0, "completed"), "A");
        assert_eq!(letter_grade(89.9, "completed"), "B");
        assert_eq!(letter_grade(80.0, "completed"), "B");
        assert_eq!(letter_grade(70.0, "completed"), "C");
        assert_eq!(letter_grade(65.0, "completed"), "D");
        assert_eq!(letter_grade(60.0, "completed"), "D");
        assert_eq!(letter_grade(59.9, "completed"), "F");
        assert_eq!(letter_grade(0.0, "completed"), "F");
    }

    #[test]
    fn anything_not_completed_is_not_graded() {
        assert_eq!(letter_grade(95.0, "in_progress"), "N/A");
        assert_eq!(letter_grade(95.0, "active"), "N/A");
        assert_eq!(letter_grade(0.0, ""), "N/A");
    }
}
