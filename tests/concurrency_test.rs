//! Test that timers can run on several threads, one timer per thread.

use std::thread;

use mockbench::{MemorySink, Timer};

#[test]
fn timer_per_thread() {
    let resolution = mockbench::resolution_us();

    // Spawn 4 threads, each owning its own timer and sample set
    let handles: Vec<_> = (0..4u32)
        .map(|i| {
            thread::spawn(move || {
                let sink = MemorySink::new();
                let mut timer = Timer::quick().with_sink(sink.clone());

                let report = timer
                    .measure(&format!("worker {}", i), || {
                        let mut acc = i;
                        for byte in 0..128u32 {
                            acc = acc.wrapping_mul(31).wrapping_add(byte);
                        }
                        std::hint::black_box(acc)
                    })
                    .unwrap();

                (report, sink.lines().len())
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let (report, lines) = handle.join().unwrap();
        assert_eq!(report.label, format!("worker {}", i));
        assert_eq!(report.summary.samples, 100);
        assert_eq!(lines, 2);
        // Every thread sees the same cached resolution
        assert_eq!(report.resolution_us.to_bits(), resolution.to_bits());
    }
}

#[test]
fn timer_can_move_between_threads() {
    let sink = MemorySink::new();
    let mut timer = Timer::new(1, 10).unwrap().with_sink(sink.clone());
    timer.measure("main thread", || ()).unwrap();

    let timer = thread::spawn(move || {
        timer.measure("worker thread", || ()).unwrap();
        timer
    })
    .join()
    .unwrap();

    assert_eq!(timer.config().samples(), 10);
    // Resolution line is emitted once per timer, not once per thread.
    assert_eq!(sink.lines().len(), 3);
}

#[test]
fn many_sequential_runs() {
    let mut timer = Timer::new(0, 50).unwrap().with_sink(MemorySink::new());
    for i in 0..10 {
        let report = timer.measure(&format!("run {}", i), || i * 2).unwrap();
        assert_eq!(report.summary.samples, 50);
    }
}
