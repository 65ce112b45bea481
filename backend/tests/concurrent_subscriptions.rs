//! Concurrent subscribe requests against one meal must all be kept.

mod support;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use futures::future::join_all;
use serde_json::Value;

use meals::domain::{AdminSeed, Registration};
use meals::test_support::http::in_memory_services;
use support::{add_meal, bearer, init_app, login, register};

const USERS: usize = 8;

#[actix_web::test]
async fn every_concurrent_subscriber_is_recorded() {
    let services = in_memory_services();
    services
        .auth
        .seed_admin(&AdminSeed {
            registration: Registration::try_from_parts("root", "root@example.com", "root")
                .expect("valid admin registration"),
        })
        .await
        .expect("seed");
    let app = init_app(&services).await;

    let mut tokens = Vec::with_capacity(USERS);
    for n in 0..USERS {
        let name = format!("user{n}");
        register(&app, &name, "pw").await;
        tokens.push(login(&app, &name, "pw").await);
    }
    add_meal(&app, &tokens[0], "shared").await;

    let statuses = join_all(tokens.iter().map(|token| {
        test::call_service(
            &app,
            TestRequest::put()
                .uri("/meals/0")
                .insert_header(bearer(token))
                .to_request(),
        )
    }))
    .await
    .into_iter()
    .map(|response| response.status())
    .collect::<Vec<_>>();
    assert!(statuses.iter().all(|status| *status == StatusCode::OK));

    let root = login(&app, "root", "root").await;
    let full: Value = test::call_and_read_body_json(
        &app,
        TestRequest::get()
            .uri("/admin/meals")
            .insert_header(bearer(&root))
            .to_request(),
    )
    .await;
    let mut subscribers: Vec<String> = serde_json::from_value(full[0]["subscribers"].clone())
        .expect("subscriber names");
    subscribers.sort();
    let mut expected: Vec<String> = (0..USERS).map(|n| format!("user{n}")).collect();
    expected.sort();
    assert_eq!(subscribers, expected);
}
