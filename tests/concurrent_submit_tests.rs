/// Concurrent submission tests
///
/// Many respondents submitting at once must never lose an update: every
/// accepted submission ends up in `results` and in the counters.
/// Run with: cargo test --test concurrent_submit_tests

mod common;

use std::sync::Arc;

use common::{SECRET, spawn_app, submit};
use panel_survey::{JsonDocumentStore, SurveyError};
use serde_json::json;
use tokio::sync::Barrier;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_submissions_are_all_recorded() {
    let app = spawn_app().await;
    let num_tasks = 24;
    let barrier = Arc::new(Barrier::new(num_tasks));

    let mut handles = vec![];
    for task_id in 0..num_tasks {
        let service = app.service.clone();
        let barrier = Arc::clone(&barrier);
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            service
                .submit(
                    Some(format!("E{task_id:03}")),
                    vec![95, 90, 30, 45, 60, 89],
                )
                .await
        }));
    }

    for handle in handles {
        handle.await.unwrap().expect("submission accepted");
    }

    let view = app.service.results(Some(SECRET)).await.unwrap();
    let n = num_tasks as u64;
    assert_eq!(view.results.len(), num_tasks);
    assert_eq!(view.distribution.excellent, 2 * n);
    assert_eq!(view.distribution.good_or_below, 4 * n);
    assert_eq!(view.distribution.total(), 6 * n);

    // The on-disk document agrees with what the service reports.
    let on_disk = JsonDocumentStore::new(app.data_file()).load().unwrap();
    assert!(on_disk.is_consistent());
    assert_eq!(on_disk.results.len(), num_tasks);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_mix_of_valid_and_invalid_submissions() {
    let app = spawn_app().await;

    let mut handles = vec![];
    for task_id in 0..20 {
        let router = app.router.clone();
        handles.push(tokio::spawn(async move {
            let scores = if task_id % 2 == 0 {
                json!([95, 96, 40, 50, 60, 70])
            } else {
                json!([95, 96, 97, 40, 50, 60])
            };
            submit(
                &router,
                json!({ "responder_id": format!("R{task_id}"), "scores": scores }),
            )
            .await
            .0
        }));
    }

    let mut accepted = 0;
    for handle in handles {
        if handle.await.unwrap().is_success() {
            accepted += 1;
        }
    }
    assert_eq!(accepted, 10);

    let view = app.service.results(Some(SECRET)).await.unwrap();
    assert_eq!(view.results.len(), 10);
    assert_eq!(view.distribution.total(), 60);
}

#[tokio::test]
async fn monotonic_counters_after_sequential_submissions() {
    let app = spawn_app().await;
    let batches: [[i64; 6]; 4] = [
        [95, 96, 40, 50, 60, 70],
        [30, 31, 32, 33, 34, 35],
        [98, 89, 88, 87, 86, 85],
        [90, 91, 30, 30, 30, 30],
    ];

    for (i, scores) in batches.iter().enumerate() {
        app.service
            .submit(Some(format!("S{i}")), scores.to_vec())
            .await
            .unwrap();
        let view = app.service.results(Some(SECRET)).await.unwrap();
        assert_eq!(view.results.len(), i + 1);
        assert_eq!(view.distribution.total(), 6 * (i as u64 + 1));
    }

    let view = app.service.results(Some(SECRET)).await.unwrap();
    assert_eq!(view.distribution.excellent, 5);
    assert_eq!(view.distribution.good_or_below, 19);
    assert!(matches!(
        app.service.results(Some("guess")).await,
        Err(SurveyError::Unauthorized)
    ));
}
