#[cfg(feature = "parallel")]
use fanmin::Executor;
use fanmin::{partition, partition_range, FanoutMin, TailPolicy};
use proptest::prelude::*;

/// Sequential minimum over the index space actually covered by the nested
/// truncating split, computed straight from the partition functions.
fn truncated_baseline(data: &[i64], l1: usize, l2: usize) -> i64 {
    let mut min = None;
    for range in partition(data.len(), l1, TailPolicy::Truncate).unwrap() {
        for leaf in partition_range(range, l2, TailPolicy::Truncate).unwrap() {
            let m = *data[leaf.start..=leaf.end].iter().min().unwrap();
            min = Some(min.map_or(m, |cur: i64| cur.min(m)));
        }
    }
    min.unwrap()
}

proptest! {
    #[test]
    fn cover_matches_linear_scan(
        data in prop::collection::vec(-1_000_000i64..1_000_000, 1..200),
        l1 in 1usize..5,
        l2 in 1usize..5,
    ) {
        prop_assume!(data.len() >= l1 * l2);
        let expected = *data.iter().min().unwrap();
        let threads = FanoutMin::with_fanout(&data, l1, l2).run().unwrap();
        prop_assert_eq!(threads, expected);
        #[cfg(feature = "parallel")]
        {
            let pool = FanoutMin::with_fanout(&data, l1, l2)
                .executor(Executor::Pool)
                .run()
                .unwrap();
            prop_assert_eq!(pool, expected);
        }
    }

    #[test]
    fn truncate_matches_covered_space_scan(
        data in prop::collection::vec(-1_000_000i64..1_000_000, 1..200),
        l1 in 1usize..5,
        l2 in 1usize..5,
    ) {
        prop_assume!(data.len() >= l1 * l2);
        let expected = truncated_baseline(&data, l1, l2);
        let threads = FanoutMin::with_fanout(&data, l1, l2)
            .tail_policy(TailPolicy::Truncate)
            .run()
            .unwrap();
        prop_assert_eq!(threads, expected);
        #[cfg(feature = "parallel")]
        {
            let pool = FanoutMin::with_fanout(&data, l1, l2)
                .tail_policy(TailPolicy::Truncate)
                .executor(Executor::Pool)
                .run()
                .unwrap();
            prop_assert_eq!(pool, expected);
        }
    }

    #[test]
    fn executors_agree_per_policy(
        data in prop::collection::vec(any::<i32>(), 4..128),
        l2 in 1usize..4,
    ) {
        let l1 = 2usize;
        prop_assume!(data.len() >= l1 * l2);
        for policy in [TailPolicy::Cover, TailPolicy::Truncate] {
            let threads = FanoutMin::with_fanout(&data, l1, l2)
                .tail_policy(policy)
                .run()
                .unwrap();
            #[cfg(feature = "parallel")]
            {
                let pool = FanoutMin::with_fanout(&data, l1, l2)
                    .tail_policy(policy)
                    .executor(Executor::Pool)
                    .run()
                    .unwrap();
                prop_assert_eq!(threads, pool);
            }
            #[cfg(not(feature = "parallel"))]
            let _ = threads;
        }
    }
}
