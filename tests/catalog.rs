mod common;

use actix_web::{http::StatusCode, test as actix_test};
use common::{
    body_string, create_course, create_user, login_request, seed_cs101, session_cookie, setup,
    test_app,
};
use online_course::errors::OnlineCourseError;
use online_course::services::courses::{course_detail, list_top_courses};
use online_course::services::enrollments::enroll;

#[actix_web::test]
async fn top_courses_are_capped_and_sorted() {
    let ctx = setup().await;
    let storage = ctx.storage.as_ref();

    let mut courses = Vec::new();
    for i in 0..12 {
        courses.push(create_course(storage, &format!("Course {i}")).await);
    }
    let users = [
        create_user(storage, "user_a", "pw").await,
        create_user(storage, "user_b", "pw").await,
        create_user(storage, "user_c", "pw").await,
    ];

    for (course_index, enrollments) in [(11, 3), (5, 2), (2, 2), (7, 1)] {
        for user in users.iter().take(enrollments) {
            enroll(storage, Some(user), courses[course_index].id).await.unwrap();
        }
    }

    let listed = list_top_courses(storage, Some(&users[2])).await.unwrap();
    assert_eq!(listed.len(), 10);

    let expected: Vec<i64> = [11, 2, 5, 7, 0, 1, 3, 4, 6, 8]
        .iter()
        .map(|i| courses[*i].id)
        .collect();
    let actual: Vec<i64> = listed.iter().map(|item| item.course.id).collect();
    assert_eq!(actual, expected);

    for pair in listed.windows(2) {
        assert!(pair[0].course.total_enrollment >= pair[1].course.total_enrollment);
    }

    // user_c 只选了 course 11
    let enrolled: Vec<i64> = listed
        .iter()
        .filter(|item| item.is_enrolled)
        .map(|item| item.course.id)
        .collect();
    assert_eq!(enrolled, vec![courses[11].id]);
}

#[actix_web::test]
async fn anonymous_viewer_is_never_enrolled() {
    let ctx = setup().await;
    let storage = ctx.storage.as_ref();
    let user = create_user(storage, "erin", "pw").await;
    let course = create_course(storage, "Rust 101").await;
    enroll(storage, Some(&user), course.id).await.unwrap();

    let listed = list_top_courses(storage, None).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(!listed[0].is_enrolled);
    assert_eq!(listed[0].course.total_enrollment, 1);
}

#[actix_web::test]
async fn detail_includes_exam_only_for_enrolled_viewer() {
    let ctx = setup().await;
    let storage = ctx.storage.as_ref();
    let cs101 = seed_cs101(storage).await;
    let user = create_user(storage, "frank", "pw").await;

    let detail = course_detail(storage, Some(&user), cs101.course.id).await.unwrap();
    assert!(!detail.is_enrolled);
    assert_eq!(detail.lessons.len(), 1);
    assert!(detail.questions.is_empty());

    enroll(storage, Some(&user), cs101.course.id).await.unwrap();
    let detail = course_detail(storage, Some(&user), cs101.course.id).await.unwrap();
    assert!(detail.is_enrolled);
    assert_eq!(detail.questions.len(), 1);
    assert_eq!(detail.questions[0].choices.len(), 2);

    let err = course_detail(storage, None, 31337).await.unwrap_err();
    assert!(matches!(err, OnlineCourseError::NotFound(_)));
}

#[actix_web::test]
async fn course_pages_render() {
    let ctx = setup().await;
    let storage = ctx.storage.as_ref();
    let cs101 = seed_cs101(storage).await;
    create_user(storage, "gina", "pw").await;
    let app = actix_test::init_service(test_app(&ctx)).await;

    let req = actix_test::TestRequest::get().uri("/onlinecourse/").to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains("CS101"));

    let detail_uri = format!("/onlinecourse/{}/", cs101.course.id);
    let req = actix_test::TestRequest::get().uri(&detail_uri).to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.contains("Bits and bytes"));
    assert!(!body.contains("questionform"));

    let resp = actix_test::call_service(&app, login_request("gina", "pw").to_request()).await;
    let cookie = session_cookie(&resp).unwrap();
    let req = actix_test::TestRequest::post()
        .uri(&format!("/onlinecourse/{}/enroll/", cs101.course.id))
        .cookie(cookie.clone())
        .to_request();
    actix_test::call_service(&app, req).await;

    let req = actix_test::TestRequest::get()
        .uri(&detail_uri)
        .cookie(cookie)
        .to_request();
    let body = body_string(actix_test::call_service(&app, req).await).await;
    assert!(body.contains("questionform"));
    assert!(body.contains(&format!("name=\"choice_{}\"", cs101.c1)));
}

#[actix_web::test]
async fn missing_or_malformed_course_id_is_not_found() {
    let ctx = setup().await;
    let app = actix_test::init_service(test_app(&ctx)).await;

    for uri in ["/onlinecourse/999/", "/onlinecourse/not-a-number/"] {
        let req = actix_test::TestRequest::get().uri(uri).to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[actix_web::test]
async fn stylesheet_is_served() {
    let ctx = setup().await;
    let app = actix_test::init_service(test_app(&ctx)).await;

    let req = actix_test::TestRequest::get().uri("/static/style.css").to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = actix_test::TestRequest::get().uri("/static/missing.css").to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn demo_catalogue_only_seeds_empty_database() {
    use online_course::runtime::lifetime::seed::seed_demo_catalogue;

    let ctx = setup().await;
    let storage = ctx.storage.as_ref();

    let inserted = seed_demo_catalogue(storage).await.unwrap();
    assert_eq!(inserted, 3);
    assert_eq!(storage.count_courses().await.unwrap(), 3);

    // 第二次调用不会重复写入
    assert_eq!(seed_demo_catalogue(storage).await.unwrap(), 0);
    assert_eq!(storage.count_courses().await.unwrap(), 3);

    let listed = list_top_courses(storage, None).await.unwrap();
    let cs101 = listed
        .iter()
        .find(|item| item.course.name.starts_with("CS101"))
        .expect("CS101 seeded");
    assert!(!storage
        .list_exam_questions(cs101.course.id)
        .await
        .unwrap()
        .is_empty());
}
