//! Concurrency tests: lookups racing reloads, and the rate gate under
//! parallel same-user traffic.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use staff_lookup::{
    LookupConfig, LookupOutcome, LookupService, RateLimitConfig, Record,
};

const ADMIN: u64 = 1;

fn record(pairs: &[(&str, &str)]) -> Record {
    let fields: BTreeMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Record::from_raw_fields(fields)
}

fn generation(n: usize, size: usize) -> Vec<Record> {
    (0..size)
        .map(|i| {
            record(&[
                ("full_name", &format!("Person G{n} N{i}")[..]),
                ("email", &format!("g{n}.n{i}@example.com")[..]),
            ])
        })
        .collect()
}

#[test]
fn lookups_race_reloads_without_torn_reads() {
    let config = LookupConfig::default()
        .with_rate_limit(RateLimitConfig::default().with_max_requests(1_000_000))
        .with_admin_ids(vec![ADMIN]);
    let service = Arc::new(LookupService::new(config).unwrap());
    service.replace_records(ADMIN, generation(0, 20)).unwrap();

    let stop = Arc::new(AtomicBool::new(false));

    thread::scope(|s| {
        // Writer: keep swapping generations.
        {
            let service = Arc::clone(&service);
            let stop = Arc::clone(&stop);
            s.spawn(move || {
                for n in 1..50 {
                    service.replace_records(ADMIN, generation(n, 20)).unwrap();
                }
                stop.store(true, Ordering::Release);
            });
        }

        // Readers: every hit must be internally consistent with a single
        // generation, never a mix.
        for reader in 0..4 {
            let service = Arc::clone(&service);
            let stop = Arc::clone(&stop);
            s.spawn(move || {
                let user = 100 + reader;
                while !stop.load(Ordering::Acquire) {
                    let response = service.lookup(user, "person g0 n0");
                    match response.outcome {
                        LookupOutcome::Found(rec) => {
                            assert!(rec.email_norm.starts_with("g0.n0@"));
                        }
                        LookupOutcome::NoMatch | LookupOutcome::Suggestions(_) => {}
                        other => panic!("unexpected outcome: {other:?}"),
                    }
                    let stats = service.stats();
                    assert_eq!(stats.rows, 20);
                }
            });
        }
    });
}

#[test]
fn old_snapshot_readable_after_swap() {
    let service = LookupService::new(
        LookupConfig::default().with_admin_ids(vec![ADMIN]),
    )
    .unwrap();
    service.replace_records(ADMIN, generation(0, 5)).unwrap();

    let held = service.store().snapshot();
    service.replace_records(ADMIN, generation(1, 3)).unwrap();

    assert_eq!(held.len(), 5);
    assert!(held.records()[0].full_name.starts_with("Person G0"));
    assert_eq!(service.store().snapshot().len(), 3);
}

#[test]
fn parallel_same_user_lookups_respect_the_budget() {
    let config = LookupConfig::default()
        .with_rate_limit(RateLimitConfig::default().with_max_requests(6))
        .with_admin_ids(vec![ADMIN]);
    let service = Arc::new(LookupService::new(config).unwrap());
    service
        .replace_records(ADMIN, generation(0, 3))
        .unwrap();

    let outcomes: Vec<bool> = thread::scope(|s| {
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let service = Arc::clone(&service);
                s.spawn(move || {
                    let response = service.lookup(7, "g0.n0@example.com");
                    !matches!(response.outcome, LookupOutcome::RateLimited { .. })
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(outcomes.iter().filter(|admitted| **admitted).count(), 6);
}

#[test]
fn concurrent_distinct_users_all_admitted() {
    let service = Arc::new(LookupService::new(LookupConfig::default()).unwrap());
    service.store().replace(generation(0, 3));

    thread::scope(|s| {
        for user in 0..16 {
            let service = Arc::clone(&service);
            s.spawn(move || {
                let response = service.lookup(user, "g0.n1@example.com");
                assert!(matches!(response.outcome, LookupOutcome::Found(_)));
            });
        }
    });

    assert_eq!(service.stats().rate.total_limited, 0);
}
