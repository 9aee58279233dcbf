/*!
 * Concurrency Tests
 * Event storms from many threads against query and session churn
 */

use instance_tracker::{AcceptAll, InstanceTracker, ObjectId, TypeTag};
use serial_test::serial;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

const WRITER_THREADS: u64 = 8;
const EVENTS_PER_THREAD: u64 = 5_000;
const LIFECYCLE_ROUNDS: usize = 500;

// Identities unique across threads without coordination
fn unique_id(writer: u64, seq: u64) -> ObjectId {
    ObjectId::new((writer << 32) | seq)
}

#[test]
#[serial]
fn test_event_storm_conserves_counters() {
    let tracker = InstanceTracker::new();
    tracker.begin_tracking().unwrap();
    tracker.enable_generations().unwrap();

    let barrier = Arc::new(Barrier::new(WRITER_THREADS as usize + 1));
    let mut handles = vec![];

    for writer in 0..WRITER_THREADS {
        let tracker = tracker.clone();
        let barrier = Arc::clone(&barrier);

        handles.push(thread::spawn(move || {
            let tag = TypeTag::new(writer);
            barrier.wait();

            for seq in 0..EVENTS_PER_THREAD {
                let id = unique_id(writer, seq);
                tracker.on_allocate(tag, id, 16);
                // Free every other instance to keep both paths hot
                if seq % 2 == 0 {
                    tracker.on_deallocate(tag, id);
                }
            }
        }));
    }

    // Interleave generation marks with the storm
    let marker = {
        let tracker = tracker.clone();
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for _ in 0..4 {
                tracker.mark_generation();
                thread::yield_now();
            }
        })
    };

    for handle in handles {
        handle.join().unwrap();
    }
    marker.join().unwrap();

    let summary = tracker.current_summary();
    let generations = tracker.generation_summaries();
    assert_eq!(tracker.generation_count(), 5);

    for writer in 0..WRITER_THREADS {
        let tag = TypeTag::new(writer);
        let expected_alive = EVENTS_PER_THREAD / 2;

        assert_eq!(summary[&tag].allocations, EVENTS_PER_THREAD);
        assert_eq!(summary[&tag].deallocations, EVENTS_PER_THREAD / 2);
        assert_eq!(summary[&tag].alive_objects(), expected_alive as i64);

        // Every survivor is attributed to exactly one window
        let attributed: usize = generations
            .iter()
            .filter_map(|generation| generation.get(&tag))
            .sum();
        assert_eq!(attributed as u64, expected_alive);

        let instances = tracker.instances_of_type(tag, &AcceptAll).unwrap();
        assert_eq!(instances.len() as u64, expected_alive);
    }
}

#[test]
#[serial]
fn test_queries_race_with_writers() {
    let tracker = InstanceTracker::new();
    tracker.begin_tracking().unwrap();
    tracker.enable_generations().unwrap();

    let stop = Arc::new(AtomicBool::new(false));
    let mut writers = vec![];

    for writer in 0..WRITER_THREADS {
        let tracker = tracker.clone();
        writers.push(thread::spawn(move || {
            let tag = TypeTag::new(writer % 4);
            for seq in 0..EVENTS_PER_THREAD {
                let id = unique_id(writer, seq);
                tracker.on_allocate(tag, id, 16);
                if seq % 2 == 0 {
                    tracker.on_deallocate(tag, id);
                }
            }
        }));
    }

    // Readers assert per-type counters only ever grow
    let mut readers = vec![];
    for _ in 0..3 {
        let tracker = tracker.clone();
        let stop = Arc::clone(&stop);
        readers.push(thread::spawn(move || {
            let mut last_seen: HashMap<TypeTag, u64> = HashMap::new();
            while !stop.load(Ordering::Relaxed) {
                for (tag, entry) in tracker.current_summary() {
                    let floor = last_seen.entry(tag).or_insert(0);
                    assert!(entry.allocations >= *floor);
                    *floor = entry.allocations;
                }
                let _ = tracker.generation_summaries();
                let _ = tracker.instances_of_type(TypeTag::new(0), &AcceptAll);
            }
        }));
    }

    // Session churn on the generation engine only
    let churn = {
        let tracker = tracker.clone();
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                tracker.mark_generation();
                tracker.disable_generations();
                tracker.enable_generations().unwrap();
                thread::yield_now();
            }
        })
    };

    for handle in writers {
        handle.join().unwrap();
    }
    stop.store(true, Ordering::Relaxed);
    for handle in readers {
        handle.join().unwrap();
    }
    churn.join().unwrap();

    // The summary engine never dropped an event despite the churn
    let summary = tracker.current_summary();
    let writers_on_tag = WRITER_THREADS / 4;
    for tag_raw in 0..4 {
        let tag = TypeTag::new(tag_raw);
        assert_eq!(summary[&tag].allocations, writers_on_tag * EVENTS_PER_THREAD);
        assert_eq!(
            summary[&tag].deallocations,
            writers_on_tag * EVENTS_PER_THREAD / 2
        );
    }

    // Attribution can lag the churn but never exceeds the survivors
    for (tag, count) in tracker
        .generation_summaries()
        .iter()
        .flat_map(|generation| generation.iter())
    {
        assert!(*count as i64 <= summary[tag].alive_objects());
    }
}

#[test]
#[serial]
fn test_session_transitions_race_cleanly() {
    let tracker = InstanceTracker::new();
    let begins = Arc::new(AtomicU64::new(0));
    let ends = Arc::new(AtomicU64::new(0));
    let barrier = Arc::new(Barrier::new(4));
    let mut handles = vec![];

    for _ in 0..4 {
        let tracker = tracker.clone();
        let begins = Arc::clone(&begins);
        let ends = Arc::clone(&ends);
        let barrier = Arc::clone(&barrier);

        handles.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..LIFECYCLE_ROUNDS {
                if tracker.begin_tracking().is_ok() {
                    begins.fetch_add(1, Ordering::Relaxed);
                }
                if tracker.end_tracking().is_ok() {
                    ends.fetch_add(1, Ordering::Relaxed);
                }
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    // Paired transitions: at most one session can be open at the end
    let open = begins.load(Ordering::Relaxed) - ends.load(Ordering::Relaxed);
    assert_eq!(open, u64::from(tracker.is_tracking()));
}
