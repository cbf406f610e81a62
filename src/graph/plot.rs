use std::fmt;

use glam::Vec2;
use log::debug;
use serde::{Deserialize, Serialize};

use super::queue::SampleBuffer;
use crate::{
    config::{PIXELS_PER_METRE, PLOT_SCROLL_FRACTION},
    core::Body,
    error::{Result, SandboxError},
};

/// What a plot measures on its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantity {
    Displacement,
    Velocity,
    Acceleration,
    KineticEnergy,
}

impl Quantity {
    pub fn units(&self) -> &'static str {
        match self {
            Quantity::Displacement => "m",
            Quantity::Velocity => "m/s",
            Quantity::Acceleration => "m/s^2",
            Quantity::KineticEnergy => "J",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quantity::Displacement => "Displacement",
            Quantity::Velocity => "Velocity",
            Quantity::Acceleration => "Acceleration",
            Quantity::KineticEnergy => "Kinetic Energy",
        };
        write!(f, "{name} ({})", self.units())
    }
}

/// Which part of a vector quantity is plotted. Scalars ignore it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    X,
    /// Negated so that up on screen plots as positive.
    Y,
    #[default]
    Magnitude,
}

impl Component {
    fn of(&self, vector: Vec2) -> f32 {
        match self {
            Component::X => vector.x,
            Component::Y => -vector.y,
            Component::Magnitude => vector.length(),
        }
    }
}

/// A rolling plot of one quantity of the tracked body.
#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    quantity: Quantity,
    component: Component,
    width: f32,
    height: f32,
    x_scale: f32,
    buffer: SampleBuffer,
    /// Last undifferentiated value and the body time it was taken at.
    previous: Option<(f32, f32)>,
}

impl Plot {
    pub fn new(quantity: Quantity, width: f32, height: f32) -> Result<Self> {
        if !(width.is_finite() && width > 0.0) {
            return Err(SandboxError::InvalidDimension {
                name: "graph width",
                value: width,
            });
        }
        let x_scale = 1.0;
        Ok(Self {
            quantity,
            component: Component::default(),
            width,
            height,
            x_scale,
            buffer: SampleBuffer::new(capacity_for(width, x_scale), height)?,
            previous: None,
        })
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn component(&self) -> Component {
        self.component
    }

    pub fn units(&self) -> &'static str {
        self.quantity.units()
    }

    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    pub fn set_quantity(&mut self, quantity: Quantity) {
        if quantity != self.quantity {
            self.quantity = quantity;
            self.clear();
        }
    }

    pub fn set_component(&mut self, component: Component) {
        if component != self.component {
            self.component = component;
            self.clear();
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.previous = None;
    }

    pub fn x_scale(&self) -> f32 {
        self.x_scale
    }

    /// Sets the horizontal spacing between points, which changes how many
    /// fit before the plot starts scrolling.
    pub fn set_x_scale(&mut self, scale: f32) -> Result<()> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(SandboxError::InvalidScale(scale));
        }
        let capacity = capacity_for(self.width, scale);
        self.buffer.resize(capacity)?;
        self.x_scale = scale;
        debug!("{} plot x scale {scale}, capacity {capacity}", self.quantity);
        Ok(())
    }

    pub fn y_scale(&self) -> f32 {
        self.buffer.scale()
    }

    pub fn set_y_scale(&mut self, scale: f32) -> Result<()> {
        self.buffer.set_scale(scale)
    }

    pub fn autoscale(&mut self) -> Option<f32> {
        self.buffer.autoscale()
    }

    /// Reads the plotted value off a body, in plot units, before any
    /// differentiation.
    pub fn measure(&self, body: &Body) -> f32 {
        match self.quantity {
            Quantity::Displacement => self.component.of(body.displacement() / PIXELS_PER_METRE),
            Quantity::Velocity | Quantity::Acceleration => {
                self.component.of(body.velocity() / PIXELS_PER_METRE)
            }
            Quantity::KineticEnergy => body.kinetic_energy() / (PIXELS_PER_METRE * PIXELS_PER_METRE),
        }
    }

    /// Appends one sample taken from `body` and returns the plotted value.
    pub fn record(&mut self, body: &Body) -> f32 {
        let time = body.elapsed();
        let mut value = self.measure(body);

        if self.quantity == Quantity::Acceleration {
            let velocity = value;
            value = match self.previous {
                Some((previous, previous_time)) if time > previous_time => {
                    let slope = (velocity - previous) / (time - previous_time);
                    if self.component == Component::Magnitude {
                        slope.abs()
                    } else {
                        slope
                    }
                }
                _ => 0.0,
            };
            self.previous = Some((velocity, time));
        }

        self.buffer.enqueue(value, time);
        value
    }
}

fn capacity_for(width: f32, x_scale: f32) -> usize {
    ((PLOT_SCROLL_FRACTION * width / x_scale).floor() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn capacity_follows_scroll_fraction() {
        assert_eq!(capacity_for(320.0, 1.0), 250);
        assert_eq!(capacity_for(320.0, 2.0), 125);
        assert_eq!(capacity_for(320.0, 1000.0), 1);
    }

    #[test]
    fn y_component_is_negated() {
        let body = Body::circle(5.0).velocity(30.0, -40.0).build().unwrap();
        let mut plot = Plot::new(Quantity::Velocity, 320.0, 100.0).unwrap();

        plot.set_component(Component::Y);
        assert_abs_diff_eq!(plot.measure(&body), 4.0);
        plot.set_component(Component::X);
        assert_abs_diff_eq!(plot.measure(&body), 3.0);
        plot.set_component(Component::Magnitude);
        assert_abs_diff_eq!(plot.measure(&body), 5.0);
    }

    #[test]
    fn changing_component_clears_samples() {
        let body = Body::circle(5.0).velocity(10.0, 0.0).build().unwrap();
        let mut plot = Plot::new(Quantity::Velocity, 320.0, 100.0).unwrap();
        plot.record(&body);
        plot.record(&body);

        plot.set_component(Component::X);

        assert!(plot.buffer().is_empty());
    }

    #[test]
    fn rejected_x_scale_keeps_capacity() {
        let mut plot = Plot::new(Quantity::Displacement, 320.0, 100.0).unwrap();
        assert_eq!(plot.set_x_scale(0.0), Err(SandboxError::InvalidScale(0.0)));
        assert_eq!(plot.buffer().capacity(), 250);
        assert_eq!(plot.x_scale(), 1.0);
    }

    #[test]
    fn units_per_quantity() {
        assert_eq!(Quantity::KineticEnergy.units(), "J");
        assert_eq!(Quantity::Acceleration.to_string(), "Acceleration (m/s^2)");
    }
}
