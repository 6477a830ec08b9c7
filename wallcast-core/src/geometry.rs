/// Wall geometry: faces and the meshes that position them
use crate::color::Color;
use crate::vector::Vec3;

/// One vertical wall segment.
///
/// `p1` and `p2` sit on the floor plane (`y = 0`) in mesh-local space and
/// form the base of a quad the renderer extrudes to the configured ceiling
/// and floor heights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub p1: Vec3,
    pub p2: Vec3,
    pub color: Color,
}

impl Face {
    pub fn new(p1: Vec3, p2: Vec3, color: Color) -> Self {
        Self {
            p1: Vec3::new(p1.x, 0.0, p1.z),
            p2: Vec3::new(p2.x, 0.0, p2.z),
            color,
        }
    }

    /// Length of the wall along the floor.
    pub fn width(&self) -> f32 {
        (self.p2 - self.p1).norm()
    }
}

/// A positioned, yaw-rotated collection of walls.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub position: Vec3,
    /// Yaw in radians.
    pub rotation: f32,
    /// Reserved; the renderer does not apply it.
    pub scale: Vec3,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: 0.0,
            scale: Vec3::new(1.0, 1.0, 1.0),
            faces: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            faces: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn add_face(&mut self, p1: Vec3, p2: Vec3, color: Color) {
        self.faces.push(Face::new(p1, p2, color));
    }

    /// Wrap an externally produced wall list into a single mesh at the origin.
    pub fn from_walls<I>(walls: I) -> Self
    where
        I: IntoIterator<Item = (Vec3, Vec3, Color)>,
    {
        let mut mesh = Self::new();
        for (p1, p2, color) in walls {
            mesh.add_face(p1, p2, color);
        }
        mesh
    }

    /// Square pillar of side `size` centered on the local origin, walls
    /// wound to face outwards.
    pub fn cube(size: f32, color: Color) -> Self {
        let h = size / 2.0;
        let (nw, ne) = (Vec3::new(-h, 0.0, h), Vec3::new(h, 0.0, h));
        let (sw, se) = (Vec3::new(-h, 0.0, -h), Vec3::new(h, 0.0, -h));

        let mut mesh = Self::with_capacity(4);
        mesh.add_face(sw, se, color);
        mesh.add_face(se, ne, color);
        mesh.add_face(ne, nw, color);
        mesh.add_face(nw, sw, color);
        mesh
    }

    /// Enclosure of `width x depth` centered on the local origin, walls wound
    /// to face inwards.
    ///
    /// Colors are assigned south, east, north, west. Missing slots repeat
    /// the first color; with no colors at all every wall is [`Color::GRAY`].
    pub fn room(width: f32, depth: f32, colors: &[Color]) -> Self {
        let first = colors.first().copied().unwrap_or(Color::GRAY);
        let color = |i: usize| colors.get(i).copied().unwrap_or(first);

        let (hw, hd) = (width / 2.0, depth / 2.0);
        let (nw, ne) = (Vec3::new(-hw, 0.0, hd), Vec3::new(hw, 0.0, hd));
        let (sw, se) = (Vec3::new(-hw, 0.0, -hd), Vec3::new(hw, 0.0, -hd));

        let mut mesh = Self::with_capacity(4);
        mesh.add_face(se, sw, color(0));
        mesh.add_face(ne, se, color(1));
        mesh.add_face(nw, ne, color(2));
        mesh.add_face(sw, nw, color(3));
        mesh
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
