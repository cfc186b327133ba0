//! End-to-end tests for the search engine: full-domain coverage, driver
//! agreement, pruning soundness, and cancellation.

use draw_solver::{
    CancelToken, Combination, GameRules, PayoutTable, SearchConfig, SearchEngine, SearchHooks,
    TicketBook,
};

/// Deterministic ticket book built from a fixed-seed linear congruential
/// generator, so every run sees the same tickets.
#[allow(clippy::cast_possible_truncation)] // values are reduced modulo the pool size
fn random_book(rules: GameRules, tickets: usize, seed: u64) -> TicketBook {
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        ((state >> 33) % u64::from(rules.pool_size)) as u8 + 1
    };

    let mut book = Vec::with_capacity(tickets);
    for _ in 0..tickets {
        let mut numbers = Vec::with_capacity(usize::from(rules.pick_size));
        let mut seen = 0u64;
        while numbers.len() < usize::from(rules.pick_size) {
            let n = next();
            if seen & (1u64 << (n - 1)) == 0 {
                seen |= 1u64 << (n - 1);
                numbers.push(n);
            }
        }
        book.push(Combination::new(numbers));
    }
    TicketBook::new(book)
}

#[test]
fn full_domain_is_searched_for_the_standard_game() {
    let book = TicketBook::new(Vec::new());
    let engine = SearchEngine::new(&book, SearchConfig::default());

    let report = engine.run_parallel();
    assert_eq!(report.candidates_evaluated, 177_100);
    assert_eq!(report.min_payout, 0);
    // With no tickets every draw pays zero and every draw ties
    assert_eq!(report.tie_count(), 177_100);

    // Equal tie-break scores keep enumeration order
    assert_eq!(report.results[0].combination.numbers(), &[1, 2, 3, 4, 5, 6]);
    assert_eq!(
        report.results[177_099].combination.numbers(),
        &[20, 21, 22, 23, 24, 25]
    );
}

#[test]
fn every_draw_ties_when_the_book_is_empty_in_a_small_game() {
    let rules = GameRules::new(8, 6).unwrap();
    let book = TicketBook::new(Vec::new());
    let config = SearchConfig {
        rules,
        ..SearchConfig::default()
    };
    let engine = SearchEngine::new(&book, config);

    let sequential = engine.run();
    let parallel = engine.run_parallel();

    assert_eq!(sequential.tie_count(), 28);
    assert_eq!(sequential.candidates_evaluated, 28);
    assert_eq!(sequential.results[0].combination.numbers(), &[1, 2, 3, 4, 5, 6]);
    assert_eq!(sequential.results[27].combination.numbers(), &[3, 4, 5, 6, 7, 8]);
    assert_eq!(sequential, parallel);
}

#[test]
fn known_zero_payout_draws_for_a_single_ticket() {
    let book = TicketBook::new(vec![Combination::new([1, 2, 3, 4, 5, 6])]);
    let engine = SearchEngine::new(&book, SearchConfig::default());
    let report = engine.run_parallel();

    // A draw sharing at most two numbers with the ticket pays nothing.
    // C(19,6) + 6*C(19,5) + C(6,2)*C(19,4) such draws exist.
    assert_eq!(report.min_payout, 0);
    assert_eq!(report.tie_count(), 155_040);

    let contains = |numbers: &[u8]| {
        report
            .results
            .iter()
            .any(|r| r.combination.numbers() == numbers)
    };
    assert!(contains(&[7, 8, 9, 10, 11, 12]));
    // The ticket itself hits the jackpot and can never be minimal here
    assert!(!contains(&[1, 2, 3, 4, 5, 6]));
    // Five shared numbers pay 1850
    assert!(!contains(&[1, 2, 3, 4, 5, 7]));

    for result in &report.results {
        assert_eq!(result.total_payout, 0);
        for matches in 3..=6 {
            assert_eq!(result.tally.count(matches), 0);
        }
    }
}

#[test]
fn sequential_parallel_and_unpruned_runs_agree() {
    let rules = GameRules::default();
    let book = random_book(rules, 60, 0x5eed);

    let pruned = SearchConfig::default();
    let unpruned = SearchConfig {
        prune: false,
        ..SearchConfig::default()
    };

    let engine = SearchEngine::new(&book, pruned);
    let sequential = engine.run();
    let parallel = engine.run_parallel();
    let exhaustive = SearchEngine::new(&book, unpruned).run();

    assert_eq!(sequential, parallel);
    assert_eq!(sequential, exhaustive);
    assert_eq!(sequential.candidates_evaluated, 177_100);
}

#[test]
fn parallel_search_is_repeatable() {
    let rules = GameRules::new(12, 6).unwrap();
    let book = random_book(rules, 40, 99);
    let config = SearchConfig {
        rules,
        ..SearchConfig::default()
    };
    let engine = SearchEngine::new(&book, config);

    let first = engine.run_parallel();
    let second = engine.run_parallel();
    assert_eq!(first, second);
    assert_eq!(first.candidates_evaluated, 924);
}

#[test]
fn custom_payout_table_drives_the_search() {
    // Picking 6 of 8 numbers, every draw shares at least 4 with any ticket
    let rules = GameRules::new(8, 6).unwrap();
    let book = TicketBook::new(vec![Combination::new([1, 2, 3, 4, 5, 6])]);
    let config = SearchConfig {
        rules,
        payouts: PayoutTable::from_tiers(&[(4, 7), (5, 100), (6, 1000)]),
        ..SearchConfig::default()
    };
    let engine = SearchEngine::new(&book, config);
    let report = engine.run_parallel();

    // Overlap 4 needs both 7 and 8 in the draw: C(6,4) ways to fill the rest
    assert_eq!(report.min_payout, 7);
    assert_eq!(report.tie_count(), 15);
    for result in &report.results {
        assert_eq!(result.tally.count(4), 1);
        let numbers = result.combination.numbers();
        assert!(numbers.contains(&7) && numbers.contains(&8));
    }
}

#[test]
fn cancelled_before_start_yields_no_results() {
    let book = TicketBook::new(vec![Combination::new([1, 2, 3, 4, 5, 6])]);
    let engine = SearchEngine::new(&book, SearchConfig::default());

    let token = CancelToken::new();
    token.cancel();
    let hooks = SearchHooks {
        progress: None,
        cancel: Some(&token),
    };

    let sequential = engine.run_with(hooks).unwrap_err();
    assert_eq!(sequential.evaluated, 0);
    assert_eq!(sequential.total, 177_100);

    let parallel = engine.run_parallel_with(hooks).unwrap_err();
    assert_eq!(parallel.evaluated, 0);
    assert_eq!(parallel.total, 177_100);
}
