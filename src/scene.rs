// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

use crate::config::{Color, Fill, Stroke};

/// One canvas operation. Coordinates are in the local space left by the
/// preceding `Save`/`Translate`/`Rotate`/`Restore` commands.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate {
        dx: f64,
        dy: f64,
    },
    /// Clockwise on screen (y grows downward).
    Rotate {
        degrees: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
        stroke: Stroke,
    },
    Line {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        stroke: Stroke,
    },
    Polygon {
        points: Vec<(f64, f64)>,
        fill: Fill,
    },
    Point {
        x: f64,
        y: f64,
        stroke: Stroke,
    },
    /// Horizontally centered on `x`, baseline at `y`.
    Text {
        x: f64,
        y: f64,
        text: String,
        size: f64,
        color: Color,
    },
}

/// 2D affine transform `x' = a·x + c·y + e`, `y' = b·x + d·y + f`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            e: dx,
            f: dy,
            ..Self::IDENTITY
        }
    }

    /// Clockwise rotation on a y-down screen.
    pub fn rotation(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// `self ∘ other`: `other` is applied to the point first.
    pub fn then_local(&self, other: &Affine) -> Affine {
        Affine {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Uniform length scale of the transform, used for stroke widths.
    pub fn length_scale(&self) -> f64 {
        (self.a * self.d - self.b * self.c).abs().sqrt()
    }
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Brackets the commands added by `f` with `Save`, `Rotate` and `Restore`.
    pub fn rotated(&mut self, degrees: f64, f: impl FnOnce(&mut Scene)) {
        self.add_command(DrawCommand::Save);
        self.add_command(DrawCommand::Rotate { degrees });
        f(self);
        self.add_command(DrawCommand::Restore);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Replays the scene from `base`, handing every drawing command to `f`
    /// together with the transform in effect for it. An unmatched
    /// `Restore` is ignored.
    pub fn for_each_transformed(&self, base: Affine, mut f: impl FnMut(&Affine, &DrawCommand)) {
        let mut current = base;
        let mut stack: Vec<Affine> = Vec::new();
        for command in &self.commands {
            match command {
                DrawCommand::Save => stack.push(current),
                DrawCommand::Restore => match stack.pop() {
                    Some(saved) => current = saved,
                    None => log::debug!("restore without matching save ignored"),
                },
                DrawCommand::Translate { dx, dy } => {
                    current = current.then_local(&Affine::translation(*dx, *dy));
                }
                DrawCommand::Rotate { degrees } => {
                    current = current.then_local(&Affine::rotation(*degrees));
                }
                drawable => f(&current, drawable),
            }
        }
    }
}
