//! 站内跳转地址

pub const HOME: &str = "/onlinecourse/";

pub fn course_detail(course_id: i64) -> String {
    format!("/onlinecourse/{course_id}/")
}

pub fn exam_result(course_id: i64, submission_id: i64) -> String {
    format!("/onlinecourse/course/{course_id}/submission/{submission_id}/result/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(course_detail(3), "/onlinecourse/3/");
        assert_eq!(
            exam_result(3, 9),
            "/onlinecourse/course/3/submission/9/result/"
        );
    }
}
