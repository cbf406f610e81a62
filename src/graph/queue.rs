use serde::{Deserialize, Serialize};

use crate::error::{Result, SandboxError};

/// One plotted point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// `raw · scale`, clamped into `[-bound, bound]`.
    pub scaled: f32,
    pub raw: f32,
    /// Set when `scaled` had to be clamped.
    pub out_of_bounds: bool,
    /// Timestamp the sample was taken at.
    pub label: f32,
}

impl Sample {
    fn new(raw: f32, label: f32, scale: f32, bound: f32) -> Self {
        let mut sample = Self {
            raw,
            label,
            ..Self::default()
        };
        sample.rescale(scale, bound);
        sample
    }

    fn rescale(&mut self, scale: f32, bound: f32) {
        let scaled = self.raw * scale;
        self.out_of_bounds = scaled > bound || scaled < -bound;
        self.scaled = scaled.clamp(-bound, bound);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct RunningMax {
    value: f32,
    index: usize,
}

/// Bounded circular buffer holding one time series.
///
/// Enqueueing into a full buffer overwrites the oldest sample. Logical index
/// `i` (0 = oldest) lives in physical slot `(front + i) % capacity`.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<Sample>,
    front: Option<usize>,
    back: Option<usize>,
    running_max: RunningMax,
    scale: f32,
    bound: f32,
}

impl SampleBuffer {
    /// Creates an empty buffer. `bound` is the largest magnitude a scaled
    /// sample may take, normally the graph height.
    pub fn new(capacity: usize, bound: f32) -> Result<Self> {
        if capacity == 0 {
            return Err(SandboxError::InvalidCapacity);
        }
        if !(bound.is_finite() && bound > 0.0) {
            return Err(SandboxError::InvalidDimension {
                name: "graph height",
                value: bound,
            });
        }
        Ok(Self {
            samples: vec![Sample::default(); capacity],
            front: None,
            back: None,
            running_max: RunningMax::default(),
            scale: 1.0,
            bound,
        })
    }

    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    pub fn len(&self) -> usize {
        match (self.front, self.back) {
            (Some(front), Some(back)) => (back + self.capacity() - front) % self.capacity() + 1,
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.front.is_none()
    }

    pub fn is_full(&self) -> bool {
        match (self.front, self.back) {
            (Some(front), Some(back)) => (back + 1) % self.capacity() == front,
            _ => false,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn bound(&self) -> f32 {
        self.bound
    }

    /// Appends a sample, dropping the oldest first when full. Returns the
    /// physical slot written.
    pub fn enqueue(&mut self, raw: f32, label: f32) -> usize {
        if self.is_full() {
            self.dequeue();
        }
        let back = self.back.map_or(0, |back| (back + 1) % self.capacity());
        self.samples[back] = Sample::new(raw, label, self.scale, self.bound);
        self.back = Some(back);
        if self.front.is_none() {
            self.front = Some(back);
        }
        self.update_running_max(back);
        back
    }

    /// Removes and returns the oldest sample, or `None` when empty.
    pub fn dequeue(&mut self) -> Option<Sample> {
        let front = self.front?;
        let removed = self.samples[front];
        if Some(front) == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.front = Some((front + 1) % self.capacity());
        }
        if front == self.running_max.index {
            self.rescan_running_max();
        }
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.front = None;
        self.back = None;
        self.running_max = RunningMax::default();
    }

    /// Changes the capacity, dropping the oldest samples when shrinking.
    /// Retained samples keep their order and are laid out from slot 0.
    pub fn resize(&mut self, capacity: usize) -> Result<()> {
        if capacity == 0 {
            return Err(SandboxError::InvalidCapacity);
        }
        while self.len() > capacity {
            self.dequeue();
        }

        let mut samples: Vec<Sample> = self.iter().copied().collect();
        let retained = samples.len();
        samples.resize(capacity, Sample::default());
        self.samples = samples;

        if retained == 0 {
            self.clear();
        } else {
            self.front = Some(0);
            self.back = Some(retained - 1);
            self.rescan_running_max();
        }
        Ok(())
    }

    /// Physical slot of the `index`-th oldest sample.
    pub fn absolute_index(&self, index: usize) -> Option<usize> {
        if index >= self.len() {
            return None;
        }
        self.front.map(|front| (front + index) % self.capacity())
    }

    /// The `index`-th oldest sample.
    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.absolute_index(index).map(|slot| &self.samples[slot])
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Sample> + '_ {
        (0..self.len()).filter_map(move |index| self.get(index))
    }

    pub fn newest(&self) -> Option<&Sample> {
        self.back.map(|back| &self.samples[back])
    }

    /// Largest raw magnitude being tracked, used for autoscale.
    pub fn running_max_magnitude(&self) -> f32 {
        self.running_max.value.abs()
    }

    /// Sets the vertical scale and recomputes every stored sample's scaled value.
    pub fn set_scale(&mut self, scale: f32) -> Result<()> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(SandboxError::InvalidScale(scale));
        }
        self.scale = scale;
        for sample in &mut self.samples {
            sample.rescale(scale, self.bound);
        }
        Ok(())
    }

    /// Fits the tracked maximum to the bound. Returns the applied scale, or
    /// `None` if there is nothing to fit.
    pub fn autoscale(&mut self) -> Option<f32> {
        let max = self.running_max_magnitude();
        if max == 0.0 {
            return None;
        }
        let scale = self.bound / max;
        self.set_scale(scale).ok().map(|_| scale)
    }

    fn update_running_max(&mut self, written: usize) {
        let newest = self.samples[written].raw;
        let RunningMax { value, index } = self.running_max;
        // An empty buffer's max points at slot 0 whatever it holds.
        let stale = self.samples[index].raw != value;
        if newest.abs() > value.abs() || stale {
            self.running_max = RunningMax {
                value: newest,
                index: written,
            };
        }
    }

    fn rescan_running_max(&mut self) {
        self.running_max = (0..self.len())
            .filter_map(|i| self.absolute_index(i))
            .map(|slot| RunningMax {
                value: self.samples[slot].raw,
                index: slot,
            })
            .fold(RunningMax::default(), |best, candidate| {
                if candidate.value.abs() > best.value.abs() {
                    candidate
                } else {
                    best
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_values(buffer: &SampleBuffer) -> Vec<f32> {
        buffer.iter().map(|s| s.raw).collect()
    }

    #[test]
    fn overwrites_oldest_when_full() {
        let mut buffer = SampleBuffer::new(3, 100.0).unwrap();
        for value in 1..=5 {
            buffer.enqueue(value as f32, value as f32);
        }
        assert_eq!(raw_values(&buffer), vec![3.0, 4.0, 5.0]);
        assert!(buffer.is_full());
    }

    #[test]
    fn dequeue_empty_is_none() {
        let mut buffer = SampleBuffer::new(2, 100.0).unwrap();
        assert_eq!(buffer.dequeue(), None);

        buffer.enqueue(7.0, 0.0);
        assert_eq!(buffer.dequeue().map(|s| s.raw), Some(7.0));
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
    }

    #[test]
    fn single_slot_buffer_keeps_newest() {
        let mut buffer = SampleBuffer::new(1, 100.0).unwrap();
        buffer.enqueue(1.0, 0.0);
        buffer.enqueue(2.0, 0.1);
        assert_eq!(raw_values(&buffer), vec![2.0]);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert_eq!(SampleBuffer::new(0, 100.0), Err(SandboxError::InvalidCapacity));
        let mut buffer = SampleBuffer::new(2, 100.0).unwrap();
        assert_eq!(buffer.resize(0), Err(SandboxError::InvalidCapacity));
        assert_eq!(buffer.capacity(), 2);
    }

    #[test]
    fn scaled_values_are_clamped_and_flagged() {
        let mut buffer = SampleBuffer::new(4, 10.0).unwrap();
        buffer.set_scale(2.0).unwrap();
        buffer.enqueue(3.0, 0.0);
        buffer.enqueue(-8.0, 0.1);

        let samples: Vec<Sample> = buffer.iter().copied().collect();
        assert_eq!(samples[0].scaled, 6.0);
        assert!(!samples[0].out_of_bounds);
        assert_eq!(samples[1].scaled, -10.0);
        assert!(samples[1].out_of_bounds);
    }

    #[test]
    fn stale_running_max_is_replaced() {
        let mut buffer = SampleBuffer::new(2, 100.0).unwrap();
        buffer.enqueue(-9.0, 0.0);
        buffer.enqueue(1.0, 0.1);
        assert_eq!(buffer.running_max_magnitude(), 9.0);

        // Overwrites slot 0, which held the max.
        buffer.enqueue(2.0, 0.2);
        assert_eq!(buffer.running_max_magnitude(), 2.0);
    }

    #[test]
    fn dequeued_running_max_is_dropped() {
        let mut buffer = SampleBuffer::new(5, 100.0).unwrap();
        buffer.enqueue(9.0, 0.0);
        buffer.enqueue(1.0, 0.1);

        assert_eq!(buffer.dequeue().map(|s| s.raw), Some(9.0));
        assert_eq!(buffer.running_max_magnitude(), 1.0);

        buffer.enqueue(2.0, 0.2);
        assert_eq!(raw_values(&buffer), vec![1.0, 2.0]);
        assert_eq!(buffer.running_max_magnitude(), 2.0);
        assert_eq!(buffer.autoscale(), Some(50.0));
        assert_eq!(buffer.newest().map(|s| s.scaled), Some(100.0));
    }

    #[test]
    fn draining_resets_running_max() {
        let mut buffer = SampleBuffer::new(3, 100.0).unwrap();
        buffer.enqueue(-4.0, 0.0);
        buffer.dequeue();
        assert_eq!(buffer.running_max_magnitude(), 0.0);
        assert_eq!(buffer.autoscale(), None);
    }

    #[test]
    fn autoscale_with_zero_max_is_noop() {
        let mut buffer = SampleBuffer::new(3, 50.0).unwrap();
        buffer.enqueue(0.0, 0.0);
        assert_eq!(buffer.autoscale(), None);
        assert_eq!(buffer.scale(), 1.0);
    }
}
