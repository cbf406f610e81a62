use std::collections::VecDeque;

use approx::assert_abs_diff_eq;
use kinetic_sandbox::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn raw_values(buffer: &SampleBuffer) -> Vec<f32> {
    buffer.iter().map(|sample| sample.raw).collect()
}

fn assert_invariants(buffer: &SampleBuffer, model: &VecDeque<f32>, capacity: usize) {
    assert_eq!(buffer.capacity(), capacity);
    assert_eq!(buffer.len(), model.len());
    assert!(buffer.len() <= buffer.capacity());
    assert_eq!(buffer.is_empty(), model.is_empty());
    assert_eq!(buffer.is_full(), model.len() == capacity);
    assert_eq!(raw_values(buffer), model.iter().copied().collect::<Vec<_>>());
    let model_max = model.iter().fold(0.0f32, |max, v| max.max(v.abs()));
    assert_eq!(buffer.running_max_magnitude(), model_max);
}

#[test]
fn capacity_three_keeps_last_three() {
    let mut buffer = SampleBuffer::new(3, 100.0).unwrap();
    for value in [1.0, 2.0, 3.0, 4.0, 5.0] {
        buffer.enqueue(value, 0.0);
    }

    assert_eq!(raw_values(&buffer), vec![3.0, 4.0, 5.0]);
    assert_eq!(buffer.absolute_index(0), Some(2));
    assert_eq!(buffer.absolute_index(1), Some(0));
    assert_eq!(buffer.absolute_index(2), Some(1));
    assert_eq!(buffer.absolute_index(3), None);
    assert_eq!(buffer.newest().map(|s| s.raw), Some(5.0));
}

#[test]
fn random_operations_match_a_deque() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut capacity = 5;
    let mut buffer = SampleBuffer::new(capacity, 1000.0).unwrap();
    let mut model = VecDeque::new();

    for step in 0..2000 {
        match rng.gen_range(0..10) {
            0..=5 => {
                let value = rng.gen_range(-100.0..100.0);
                buffer.enqueue(value, step as f32);
                if model.len() == capacity {
                    model.pop_front();
                }
                model.push_back(value);
            }
            6..=7 => {
                assert_eq!(buffer.dequeue().map(|s| s.raw), model.pop_front());
            }
            8 => {
                capacity = rng.gen_range(1..12);
                buffer.resize(capacity).unwrap();
                while model.len() > capacity {
                    model.pop_front();
                }
            }
            _ => {
                buffer.clear();
                model.clear();
                assert_eq!(buffer.running_max_magnitude(), 0.0);
            }
        }
        assert_invariants(&buffer, &model, capacity);
    }
}

#[test]
fn growing_keeps_order_and_adds_room() {
    let mut buffer = SampleBuffer::new(3, 100.0).unwrap();
    for value in 1..=5 {
        buffer.enqueue(value as f32, 0.0);
    }

    buffer.resize(5).unwrap();
    assert_eq!(raw_values(&buffer), vec![3.0, 4.0, 5.0]);
    assert!(!buffer.is_full());

    buffer.enqueue(6.0, 0.0);
    buffer.enqueue(7.0, 0.0);
    assert!(buffer.is_full());
    assert_eq!(raw_values(&buffer), vec![3.0, 4.0, 5.0, 6.0, 7.0]);
}

#[test]
fn shrinking_drops_the_oldest() {
    let mut buffer = SampleBuffer::new(5, 100.0).unwrap();
    for value in [9.0, -3.0, 1.0, 2.0, 4.0] {
        buffer.enqueue(value, 0.0);
    }

    buffer.resize(2).unwrap();

    assert_eq!(raw_values(&buffer), vec![2.0, 4.0]);
    assert_eq!(buffer.running_max_magnitude(), 4.0);
}

#[test]
fn running_max_tracks_magnitude() {
    let mut buffer = SampleBuffer::new(10, 100.0).unwrap();
    for value in [1.0, -7.0, 3.0, 6.5] {
        buffer.enqueue(value, 0.0);
    }
    assert_eq!(buffer.running_max_magnitude(), 7.0);
}

#[test]
fn autoscale_fits_the_maximum_and_is_idempotent() {
    let mut buffer = SampleBuffer::new(8, 120.0).unwrap();
    for value in [2.0, -4.0, 8.0, 1.0] {
        buffer.enqueue(value, 0.0);
    }

    let first = buffer.autoscale().expect("non-zero max");
    let second = buffer.autoscale().expect("non-zero max");

    assert_abs_diff_eq!(first, 15.0, epsilon = 1e-5);
    assert_eq!(first, second);
    let peak = buffer
        .iter()
        .map(|s| s.scaled.abs())
        .fold(0.0f32, f32::max);
    assert_abs_diff_eq!(peak, 120.0, epsilon = 1e-3);
    assert!(buffer.iter().all(|s| !s.out_of_bounds));
}

#[test]
fn rejected_scale_keeps_samples() {
    let mut buffer = SampleBuffer::new(4, 50.0).unwrap();
    buffer.enqueue(10.0, 0.0);

    assert_eq!(buffer.set_scale(-1.0), Err(SandboxError::InvalidScale(-1.0)));
    assert_eq!(buffer.scale(), 1.0);
    assert_eq!(buffer.get(0).map(|s| s.scaled), Some(10.0));
}

#[test]
fn labels_travel_with_samples() {
    let mut buffer = SampleBuffer::new(2, 50.0).unwrap();
    buffer.enqueue(1.0, 0.1);
    buffer.enqueue(2.0, 0.2);
    buffer.enqueue(3.0, 0.3);

    let labels: Vec<f32> = buffer.iter().map(|s| s.label).collect();
    assert_eq!(labels, vec![0.2, 0.3]);
}
