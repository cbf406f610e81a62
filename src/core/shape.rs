use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use crate::config::{CIRCLE_DRAG_COEFFICIENT, RECTANGLE_DRAG_COEFFICIENT};
use crate::error::{Result, SandboxError};

/// Geometry of a body. Dispatches every shape-dependent quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { radius: f32 },
    Rectangle { width: f32, height: f32 },
}

impl Shape {
    pub fn circle(radius: f32) -> Result<Self> {
        let shape = Shape::Circle { radius };
        shape.validate()?;
        Ok(shape)
    }

    pub fn rectangle(width: f32, height: f32) -> Result<Self> {
        let shape = Shape::Rectangle { width, height };
        shape.validate()?;
        Ok(shape)
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            Shape::Circle { radius } => positive("radius", radius),
            Shape::Rectangle { width, height } => {
                positive("width", width)?;
                positive("height", height)
            }
        }
    }

    pub fn area(&self) -> f32 {
        match *self {
            Shape::Circle { radius } => PI * radius * radius,
            Shape::Rectangle { width, height } => width * height,
        }
    }

    pub fn drag_coefficient(&self) -> f32 {
        match self {
            Shape::Circle { .. } => CIRCLE_DRAG_COEFFICIENT,
            Shape::Rectangle { .. } => RECTANGLE_DRAG_COEFFICIENT,
        }
    }

    /// Projected size facing motion along each axis: `x` is the extent met by
    /// horizontal motion (the height), `y` the extent met by vertical motion.
    ///
    /// Circles keep the sandbox's `π·r` reference length on both axes.
    pub fn cross_section(&self) -> Vec2 {
        match *self {
            Shape::Circle { radius } => Vec2::splat(PI * radius),
            Shape::Rectangle { width, height } => Vec2::new(height, width),
        }
    }

    /// Distance from the centre to the edge along each axis, used against walls.
    pub fn half_extents(&self) -> Vec2 {
        match *self {
            Shape::Circle { radius } => Vec2::splat(radius),
            Shape::Rectangle { width, height } => Vec2::new(width, height) * 0.5,
        }
    }

    /// Half-size of the axis-aligned hitbox. A circle gets the square that
    /// circumscribes it, so corner regions register as overlap.
    pub fn hitbox_half_extents(&self) -> Vec2 {
        self.half_extents()
    }
}

fn positive(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SandboxError::InvalidDimension { name, value })
    }
}

/// Axis-aligned bounding box in arena coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub min: Vec2,
    pub max: Vec2,
}

impl Hitbox {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    pub fn overlaps(&self, other: &Hitbox) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}
