mod common;

use actix_web::{http::StatusCode, test as actix_test};
use common::{create_course, create_user, location, login_request, session_cookie, setup, test_app};
use online_course::errors::OnlineCourseError;
use online_course::services::enrollments::{enroll, is_enrolled};

#[actix_web::test]
async fn enroll_is_idempotent_and_counts_once() {
    let ctx = setup().await;
    let storage = ctx.storage.as_ref();
    let user = create_user(storage, "alice", "secret").await;
    let course = create_course(storage, "Rust 101").await;

    assert!(!is_enrolled(storage, Some(&user), course.id).await.unwrap());

    assert!(enroll(storage, Some(&user), course.id).await.unwrap());
    assert!(is_enrolled(storage, Some(&user), course.id).await.unwrap());

    assert!(!enroll(storage, Some(&user), course.id).await.unwrap());
    assert!(!enroll(storage, Some(&user), course.id).await.unwrap());

    assert_eq!(storage.count_enrollments(user.id, course.id).await.unwrap(), 1);
    let course = storage.get_course_by_id(course.id).await.unwrap().unwrap();
    assert_eq!(course.total_enrollment, 1);

    let enrollment = storage
        .get_enrollment(user.id, course.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(enrollment.mode.to_string(), "honor");
}

#[actix_web::test]
async fn anonymous_enroll_changes_nothing() {
    let ctx = setup().await;
    let storage = ctx.storage.as_ref();
    let course = create_course(storage, "Rust 101").await;

    assert!(!enroll(storage, None, course.id).await.unwrap());
    assert!(!is_enrolled(storage, None, course.id).await.unwrap());

    let course = storage.get_course_by_id(course.id).await.unwrap().unwrap();
    assert_eq!(course.total_enrollment, 0);
}

#[actix_web::test]
async fn duplicate_enrollment_row_is_refused_by_storage() {
    let ctx = setup().await;
    let storage = ctx.storage.as_ref();
    let user = create_user(storage, "bob", "secret").await;
    let course = create_course(storage, "Rust 101").await;

    let mode = online_course::models::enrollments::entities::EnrollmentMode::Honor;
    assert!(storage.create_enrollment(user.id, course.id, mode).await.unwrap().is_some());
    // 模拟并发的第二次插入：唯一索引拒绝，计数不变
    assert!(storage.create_enrollment(user.id, course.id, mode).await.unwrap().is_none());

    let course = storage.get_course_by_id(course.id).await.unwrap().unwrap();
    assert_eq!(course.total_enrollment, 1);
}

#[actix_web::test]
async fn enrolling_in_missing_course_is_not_found() {
    let ctx = setup().await;
    let storage = ctx.storage.as_ref();
    let user = create_user(storage, "carol", "secret").await;

    let err = enroll(storage, Some(&user), 999).await.unwrap_err();
    assert!(matches!(err, OnlineCourseError::NotFound(_)));
}

#[actix_web::test]
async fn enroll_page_redirects_to_course_detail() {
    let ctx = setup().await;
    let storage = ctx.storage.as_ref();
    create_user(storage, "dave", "secret").await;
    let course = create_course(storage, "Rust 101").await;
    let app = actix_test::init_service(test_app(&ctx)).await;

    // 匿名选课同样跳转，但不产生记录
    let req = actix_test::TestRequest::post()
        .uri(&format!("/onlinecourse/{}/enroll/", course.id))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let detail = format!("/onlinecourse/{}/", course.id);
    assert_eq!(location(&resp).as_deref(), Some(detail.as_str()));

    let resp = actix_test::call_service(&app, login_request("dave", "secret").to_request()).await;
    let cookie = session_cookie(&resp).unwrap();

    let req = actix_test::TestRequest::post()
        .uri(&format!("/onlinecourse/{}/enroll/", course.id))
        .cookie(cookie)
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some(detail.as_str()));

    let course = storage.get_course_by_id(course.id).await.unwrap().unwrap();
    assert_eq!(course.total_enrollment, 1);

    let req = actix_test::TestRequest::post()
        .uri("/onlinecourse/4242/enroll/")
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
