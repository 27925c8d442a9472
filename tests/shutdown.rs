mod common;

use std::time::{Duration, Instant};

use gitlith::runtime;

use common::{char_key, ready_engine, MockRepo};

#[test]
fn test_quit_does_not_wait_for_running_operation() {
    let rt = runtime::build().unwrap();
    let repo = MockRepo::new(&[], &[]);

    let quit = rt.block_on(async {
        let (mut engine, mut state) = ready_engine(repo.clone()).await;
        repo.hold();
        engine.dispatch(&mut state, char_key('p'));
        assert!(engine.is_mutation_in_flight());
        engine.dispatch(&mut state, char_key('q'));
        // Let the push reach the held backend call
        tokio::time::sleep(Duration::from_millis(50)).await;
        state.should_quit
    });
    assert!(quit);

    let started = Instant::now();
    runtime::shutdown(rt);
    let elapsed = started.elapsed();
    repo.release();

    assert!(
        elapsed < Duration::from_secs(2),
        "shutdown waited {:?} on a held push",
        elapsed
    );
    assert_eq!(repo.mutating_calls(), ["push"]);
}
