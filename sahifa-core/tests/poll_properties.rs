//! Property tests for the poll-results projection.

use proptest::prelude::*;

use sahifa_core::core_store::{KeyValueStore, MemoryStore, STORAGE_KEY};
use sahifa_core::model::{seed, Poll, PollId};
use sahifa_core::ContentBackend;

/// Backend whose aggregate carries one extra poll with the given vote
/// distribution, injected through the persistence path.
fn backend_with_votes(votes: &[u64]) -> ContentBackend {
    let mut data = seed();
    let labels: Vec<String> = (0..votes.len()).map(|i| format!("خيار {}", i + 1)).collect();
    let mut poll = Poll::from_labels(PollId::new("prop-poll"), "توزيع عشوائي", labels);
    for (option, count) in poll.options.values_mut().zip(votes) {
        option.votes = *count;
    }
    data.polls.insert(poll.id.clone(), poll);

    let mut store = MemoryStore::new();
    store
        .set(STORAGE_KEY, &serde_json::to_string(&data).unwrap())
        .unwrap();
    ContentBackend::with_stores(
        Box::new(store),
        Box::new(MemoryStore::new()),
        Box::new(MemoryStore::new()),
    )
}

proptest! {
    #[test]
    fn percents_sum_to_one_hundred_within_rounding(
        votes in prop::collection::vec(0u64..10_000, 2..6)
    ) {
        let backend = backend_with_votes(&votes);
        let results = backend.poll_results("prop-poll", None).unwrap();

        let total: u64 = votes.iter().sum();
        prop_assert_eq!(results.total_votes, total);
        prop_assert!(results.options.iter().all(|o| o.percent <= 100));

        let sum: i64 = results.options.iter().map(|o| i64::from(o.percent)).sum();
        if total == 0 {
            // never NaN, never an error: all zeros
            prop_assert_eq!(sum, 0);
        } else {
            let tolerance = votes.len() as i64;
            prop_assert!((sum - 100).abs() <= tolerance,
                "sum {} out of tolerance for {:?}", sum, votes);
        }
    }
}

#[test]
fn zero_distribution_is_all_zero_percents() {
    let backend = backend_with_votes(&[0, 0, 0]);
    let results = backend.poll_results("prop-poll", None).unwrap();
    assert_eq!(results.total_votes, 0);
    assert!(results.options.iter().all(|o| o.percent == 0));
}
