//! Properties every generated trace must satisfy.

use algoviz::prelude::*;
use algoviz::trace::DEFAULT_MAX_SNAPSHOTS;
use proptest::prelude::*;

fn sample_traces() -> Vec<(Algorithm, ErasedTrace)> {
    Algorithm::ALL
        .into_iter()
        .map(|algorithm| {
            let trace = AlgorithmSpec::sample(algorithm)
                .generate(DEFAULT_MAX_SNAPSHOTS)
                .unwrap_or_else(|e| panic!("{algorithm}: {e}"));
            (algorithm, trace)
        })
        .collect()
}

#[test]
fn every_sample_trace_is_well_formed() {
    for (algorithm, trace) in sample_traces() {
        assert!(trace.len() >= 2, "{algorithm} trace too short");
        let first = trace.first().expect("non-empty");
        assert_eq!(first.kind().label(), "initialize", "{algorithm}");
        assert!(trace.last().expect("non-empty").kind().is_terminal(), "{algorithm}");

        let terminals = trace.iter().filter(|s| s.kind().is_terminal()).count();
        assert_eq!(terminals, 1, "{algorithm} has {terminals} terminal snapshots");
        assert!(trace.validate().is_ok(), "{algorithm}");
    }
}

#[test]
fn generation_is_deterministic() {
    let first = sample_traces();
    let second = sample_traces();
    for ((algorithm, a), (_, b)) in first.iter().zip(&second) {
        assert_eq!(a.len(), b.len(), "{algorithm}");
        for (i, (x, y)) in a.iter().zip(b).enumerate() {
            assert_eq!(x.kind(), y.kind(), "{algorithm} kind at {i}");
            assert_eq!(x.narration(), y.narration(), "{algorithm} narration at {i}");
            assert_eq!(x.state(), y.state(), "{algorithm} state at {i}");
        }
    }
}

#[test]
fn snapshots_are_independent_copies() {
    let trace = BubbleSort.generate(&[3, 2, 1]).expect("generate");
    let before = trace[0].state().clone();

    let mut edited = trace[0].state().clone();
    edited.array[0] = 99;
    assert_ne!(&edited, trace[0].state());
    assert_eq!(trace[0].state(), &before);

    // The working array moved on, the first capture did not.
    assert_eq!(trace[0].state().array, [3, 2, 1]);
    assert_eq!(trace.last().expect("non-empty").state().array, [1, 2, 3]);
}

#[test]
fn cloned_traces_share_snapshots() {
    let trace = InsertionSort.generate(&[5, 1, 4]).expect("generate");
    let copy = trace.clone();
    assert!(trace.same_trace(&copy));
    assert_eq!(trace, copy);
}

#[test]
fn snapshot_budget_is_enforced() {
    let values: Vec<i64> = (0..50).rev().collect();
    let result = BubbleSort.generate_with_limit(&values, 20);
    assert!(matches!(result, Err(VizError::TraceLimit { limit: 20 })));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn comparison_sorts_sort(values in prop::collection::vec(-100i64..100, 1..24)) {
        let mut expected = values.clone();
        expected.sort_unstable();

        for trace in [
            BubbleSort.generate(&values),
            SelectionSort.generate(&values),
            InsertionSort.generate(&values),
            MergeSort.generate(&values),
            QuickSort.generate(&values),
        ] {
            let trace = trace.expect("generate");
            let last = trace.last().expect("non-empty").state();
            prop_assert_eq!(&last.array, &expected);
            prop_assert_eq!(last.comparisons, trace.count(SortStep::Compare));
            prop_assert!(trace.validate().is_ok());
        }
    }

    #[test]
    fn counting_sort_matches_stable_sort(values in prop::collection::vec(0u32..20, 1..24)) {
        let trace = CountingSort.generate(&values).expect("generate");
        let output: Vec<(u32, usize)> = trace
            .last()
            .expect("non-empty")
            .state()
            .output
            .iter()
            .flatten()
            .map(|k| (k.key, k.origin))
            .collect();

        let mut expected: Vec<(u32, usize)> =
            values.iter().enumerate().map(|(i, &k)| (k, i)).collect();
        expected.sort_by_key(|&(k, _)| k);
        prop_assert_eq!(output, expected);
    }

    #[test]
    fn kmp_finds_every_occurrence(text in "[ab]{1,30}", pattern in "[ab]{1,4}") {
        let trace = Kmp.generate(&SearchQuery::new(text.as_str(), pattern.as_str())).expect("generate");
        let expected: Vec<usize> = (0..=text.len().saturating_sub(pattern.len()))
            .filter(|&i| text.len() >= pattern.len() && text[i..].starts_with(pattern.as_str()))
            .collect();
        prop_assert_eq!(&trace.last().expect("non-empty").state().matches, &expected);
    }
}
