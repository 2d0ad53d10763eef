//! View-space geometry for hit-testing and block placement.
//!
//! Coordinates are in the editor surface's logical units. Pixel density and
//! DPI handling belong to the renderer and never reach this crate.

use serde::{Deserialize, Serialize};

/// A position on the editor surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
	pub x: f32,
	pub y: f32,
}

impl Point {
	pub const fn new(x: f32, y: f32) -> Self {
		Self { x, y }
	}
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
	pub x: f32,
	pub y: f32,
	pub width: f32,
	pub height: f32,
}

impl Rect {
	/// Creates a new rectangle.
	pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
		Self {
			x,
			y,
			width,
			height,
		}
	}

	/// Returns the right edge x coordinate (exclusive).
	pub fn right(&self) -> f32 {
		self.x + self.width
	}

	/// Returns the bottom edge y coordinate (exclusive).
	pub fn bottom(&self) -> f32 {
		self.y + self.height
	}

	/// Returns true if `point` lies inside the rectangle.
	pub fn contains(&self, point: Point) -> bool {
		point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
	}

	/// Returns the rectangle's origin.
	pub fn origin(&self) -> Point {
		Point::new(self.x, self.y)
	}
}
