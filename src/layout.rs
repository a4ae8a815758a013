//! Scene geometry for a maze drawn on a `width` x `height` pixel canvas.
//!
//! Nothing here knows about physics or drawing; it only says where the obstacles go. A physics
//! layer turns each `Body` into a static (or, for the ball, dynamic) body, a renderer fills the
//! shapes in.

use crate::maze::Maze;
use crate::units::{Height, Width};

/// Thickness of the four bars framing the canvas.
pub const BOUNDARY_THICKNESS: f64 = 10.0;
/// Thickness of a closed internal wall.
pub const WALL_THICKNESS: f64 = 5.0;
/// Goal block side as a fraction of the cell side.
pub const GOAL_SCALE: f64 = 0.65;
/// Ball radius as a fraction of the shorter cell side.
pub const BALL_RADIUS_SCALE: f64 = 0.25;

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum BodyLabel {
    Boundary,
    Wall,
    Goal,
    Ball,
}

/// Axis aligned rectangle given by its centre point and its extents.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct Rectangle {
    pub centre_x: f64,
    pub centre_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(centre_x: f64, centre_y: f64, width: f64, height: f64) -> Rectangle {
        Rectangle { centre_x, centre_y, width, height }
    }

    pub fn left(&self) -> f64 {
        self.centre_x - self.width / 2.0
    }

    pub fn right(&self) -> f64 {
        self.centre_x + self.width / 2.0
    }

    pub fn top(&self) -> f64 {
        self.centre_y - self.height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.centre_y + self.height / 2.0
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left() && x <= self.right() && y >= self.top() && y <= self.bottom()
    }
}

#[derive(PartialEq, Copy, Clone, Debug)]
pub struct Circle {
    pub centre_x: f64,
    pub centre_y: f64,
    pub radius: f64,
}

impl Circle {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (dx, dy) = (x - self.centre_x, y - self.centre_y);
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

#[derive(PartialEq, Copy, Clone, Debug)]
pub enum Shape {
    Rectangle(Rectangle),
    Circle(Circle),
}

#[derive(PartialEq, Copy, Clone, Debug)]
pub struct Body {
    pub label: BodyLabel,
    pub shape: Shape,
}

/// Everything to place for one maze: frame, closed walls, goal and ball spawn point.
#[derive(PartialEq, Clone, Debug)]
pub struct SceneLayout {
    width: Width,
    height: Height,
    unit_length_x: f64,
    unit_length_y: f64,
    boundaries: Vec<Rectangle>,
    walls: Vec<Rectangle>,
    goal: Rectangle,
    ball: Circle,
}

impl SceneLayout {
    pub fn new(maze: &Maze, width: Width, height: Height) -> SceneLayout {

        let (w, h) = (width.0 as f64, height.0 as f64);
        let unit_length_x = w / maze.columns().0 as f64;
        let unit_length_y = h / maze.rows().0 as f64;

        let boundaries = vec![
            Rectangle::new(w / 2.0, 0.0, w, BOUNDARY_THICKNESS),
            Rectangle::new(w / 2.0, h, w, BOUNDARY_THICKNESS),
            Rectangle::new(0.0, h / 2.0, BOUNDARY_THICKNESS, h),
            Rectangle::new(w, h / 2.0, BOUNDARY_THICKNESS, h),
        ];

        // A closed horizontal wall lies along the bottom edge of cell (row, column), a closed
        // vertical wall along its right edge.
        let horizontal = maze.horizontal_walls()
            .iter()
            .filter(|&(_, _, open)| !open)
            .map(|(row, column, _)| {
                Rectangle::new(column as f64 * unit_length_x + unit_length_x / 2.0,
                               row as f64 * unit_length_y + unit_length_y,
                               unit_length_x,
                               WALL_THICKNESS)
            });
        let vertical = maze.vertical_walls()
            .iter()
            .filter(|&(_, _, open)| !open)
            .map(|(row, column, _)| {
                Rectangle::new(column as f64 * unit_length_x + unit_length_x,
                               row as f64 * unit_length_y + unit_length_y / 2.0,
                               WALL_THICKNESS,
                               unit_length_y)
            });
        let walls = horizontal.chain(vertical).collect();

        // Bottom right cell, nudged by half a wall so it sits clear of the walls above and left.
        let goal = Rectangle::new(w - unit_length_x / 2.0 + WALL_THICKNESS / 2.0,
                                  h - unit_length_y / 2.0 + WALL_THICKNESS / 2.0,
                                  unit_length_x * GOAL_SCALE,
                                  unit_length_y * GOAL_SCALE);

        let ball = Circle {
            centre_x: unit_length_x / 2.0,
            centre_y: unit_length_y / 2.0,
            radius: unit_length_x.min(unit_length_y) * BALL_RADIUS_SCALE,
        };

        SceneLayout {
            width,
            height,
            unit_length_x,
            unit_length_y,
            boundaries,
            walls,
            goal,
            ball,
        }
    }

    pub fn width(&self) -> Width {
        self.width
    }

    pub fn height(&self) -> Height {
        self.height
    }

    /// (cell width, cell height) in pixels.
    pub fn unit_lengths(&self) -> (f64, f64) {
        (self.unit_length_x, self.unit_length_y)
    }

    pub fn boundaries(&self) -> &[Rectangle] {
        &self.boundaries
    }

    pub fn walls(&self) -> &[Rectangle] {
        &self.walls
    }

    pub fn goal(&self) -> Rectangle {
        self.goal
    }

    pub fn ball(&self) -> Circle {
        self.ball
    }

    /// All bodies, static ones first and the ball last.
    pub fn bodies(&self) -> Vec<Body> {
        let rectangle = |label, r: &Rectangle| Body { label, shape: Shape::Rectangle(*r) };

        let mut bodies: Vec<Body> = self.boundaries
            .iter()
            .map(|r| rectangle(BodyLabel::Boundary, r))
            .chain(self.walls.iter().map(|r| rectangle(BodyLabel::Wall, r)))
            .collect();
        bodies.push(rectangle(BodyLabel::Goal, &self.goal));
        bodies.push(Body { label: BodyLabel::Ball, shape: Shape::Circle(self.ball) });
        bodies
    }

    /// Bodies carrying `label`.
    pub fn bodies_labelled(&self, label: BodyLabel) -> Vec<Body> {
        self.bodies()
            .into_iter()
            .filter(|body| body.label == label)
            .collect()
    }
}
