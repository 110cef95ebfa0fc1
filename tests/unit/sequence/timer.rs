use super::*;

#[tokio::test(start_paused = true)]
async fn sleep_completes_and_deregisters() {
    let timers = TimerSet::new();
    let run = CancellationToken::new();
    assert_eq!(timers.sleep(&run, Duration::from_millis(50)).await, Ok(()));
    assert_eq!(timers.pending(), 0);
}

#[tokio::test(start_paused = true)]
async fn clear_cancels_pending_timers_immediately() {
    let timers = TimerSet::new();
    let run = CancellationToken::new();

    let waiter = {
        let timers = timers.clone();
        let run = run.clone();
        tokio::spawn(async move { timers.sleep(&run, Duration::from_secs(3600)).await })
    };
    tokio::task::yield_now().await;
    assert_eq!(timers.pending(), 1);

    assert_eq!(timers.clear(), 1);
    assert_eq!(waiter.await.unwrap(), Err(Cancelled));
    assert_eq!(timers.pending(), 0);
    assert!(timers.is_closed());
}

#[tokio::test(start_paused = true)]
async fn closed_set_refuses_new_timers() {
    let timers = TimerSet::new();
    let run = CancellationToken::new();
    timers.clear();
    assert_eq!(
        timers.sleep(&run, Duration::from_millis(1)).await,
        Err(Cancelled)
    );
    assert_eq!(timers.pending(), 0);
}

#[tokio::test(start_paused = true)]
async fn run_cancellation_wakes_timers() {
    let timers = TimerSet::new();
    let run = CancellationToken::new();
    let waiter = {
        let timers = timers.clone();
        let run = run.clone();
        tokio::spawn(async move { timers.sleep(&run, Duration::from_secs(3600)).await })
    };
    tokio::task::yield_now().await;
    run.cancel();
    assert_eq!(waiter.await.unwrap(), Err(Cancelled));
    assert_eq!(timers.pending(), 0);
}

#[tokio::test(start_paused = true)]
async fn aborted_waiter_deregisters() {
    let timers = TimerSet::new();
    let run = CancellationToken::new();
    let waiter = {
        let timers = timers.clone();
        let run = run.clone();
        tokio::spawn(async move { timers.sleep(&run, Duration::from_secs(3600)).await })
    };
    tokio::task::yield_now().await;
    assert_eq!(timers.pending(), 1);
    waiter.abort();
    assert!(waiter.await.unwrap_err().is_cancelled());
    assert_eq!(timers.pending(), 0);
}
