/// ASCII grid maps turned into wall meshes
///
/// A map is a block of text, one character per cell:
///
/// - `#` solid block in the default stone color
/// - `1`..`4` solid block in a palette color
/// - `.` or space: open floor
/// - `S` open floor where the camera starts
///
/// The first line is the far end of the map for a camera facing +z. Every
/// solid cell becomes a pillar and a room encloses the whole grid.
use crate::camera::Camera;
use crate::color::Color;
use crate::geometry::Mesh;
use crate::vector::Vec3;
use std::fs;
use std::path::Path;

/// Side of one map cell in world units; matches the default wall height.
pub const DEFAULT_CELL_SIZE: f32 = 40.0;

pub const STONE: Color = Color::rgb(0x8a, 0x7f, 0x6e);
pub const PALETTE: [Color; 4] = [
    Color::rgb(0x9c, 0x3b, 0x2e),
    Color::rgb(0x4f, 0x7a, 0x3a),
    Color::rgb(0x3e, 0x55, 0x8c),
    Color::rgb(0xb0, 0x8a, 0x2f),
];
const BOUNDARY: Color = Color::rgb(0x5c, 0x55, 0x4a);

pub const DEMO_MAP: &str = "\
..1.......2..2..
..1..###........
.....#.......3..
..4..#...##..3..
.........##.....
.###............
......3333...#..
..2..........#..
.......S........
";

#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("level map is empty")]
    Empty,
    #[error("unknown tile {tile:?} at row {row}, column {col}")]
    UnknownTile { tile: char, row: usize, col: usize },
    #[error("duplicate spawn marker at row {row}, column {col}")]
    DuplicateSpawn { row: usize, col: usize },
}

/// A parsed map, ready to hand to the renderer.
#[derive(Debug, Clone)]
pub struct Level {
    pub meshes: Vec<Mesh>,
    pub spawn: Vec3,
    pub cell_size: f32,
    pub rows: usize,
    pub cols: usize,
    solid: Vec<bool>,
}

impl Level {
    pub fn parse(text: &str, cell_size: f32) -> Result<Self, LevelError> {
        let lines: Vec<&str> = text.lines().collect();
        let first = lines.iter().position(|l| !l.trim().is_empty());
        let last = lines.iter().rposition(|l| !l.trim().is_empty());
        let grid = match (first, last) {
            (Some(first), Some(last)) => &lines[first..=last],
            _ => return Err(LevelError::Empty),
        };

        let rows = grid.len();
        let cols = grid.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let center = |row: usize, col: usize| {
            Vec3::new(
                col as f32 * cell_size,
                0.0,
                (rows - 1 - row) as f32 * cell_size,
            )
        };

        let mut meshes = Vec::new();
        let mut spawn = None;
        let mut solid = vec![false; rows * cols];

        for (row, line) in grid.iter().enumerate() {
            for (col, tile) in line.chars().enumerate() {
                let color = match tile {
                    '.' | ' ' => continue,
                    'S' => {
                        if spawn.is_some() {
                            return Err(LevelError::DuplicateSpawn { row, col });
                        }
                        spawn = Some(center(row, col));
                        continue;
                    }
                    '#' => STONE,
                    '1'..='4' => PALETTE[tile as usize - '1' as usize],
                    _ => return Err(LevelError::UnknownTile { tile, row, col }),
                };
                solid[row * cols + col] = true;
                meshes.push(Mesh::cube(cell_size, color).at(center(row, col)));
            }
        }

        let middle = Vec3::new(
            (cols - 1) as f32 * cell_size / 2.0,
            0.0,
            (rows - 1) as f32 * cell_size / 2.0,
        );
        let room = Mesh::room(cols as f32 * cell_size, rows as f32 * cell_size, &[BOUNDARY]);
        meshes.push(room.at(middle));

        // Without a marker, start on the open cell closest to the middle.
        let spawn = spawn.unwrap_or_else(|| {
            (0..rows * cols)
                .filter(|&i| !solid[i])
                .map(|i| center(i / cols, i % cols))
                .min_by(|a, b| (a - middle).norm_squared().total_cmp(&(b - middle).norm_squared()))
                .unwrap_or(middle)
        });
        tracing::debug!(rows, cols, meshes = meshes.len(), "level parsed");

        Ok(Self {
            meshes,
            spawn,
            cell_size,
            rows,
            cols,
            solid,
        })
    }

    pub fn load(path: impl AsRef<Path>, cell_size: f32) -> Result<Self, LevelError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text, cell_size)
    }

    /// The built-in demo map.
    pub fn demo() -> Result<Self, LevelError> {
        Self::parse(DEMO_MAP, DEFAULT_CELL_SIZE)
    }

    /// Camera standing on the spawn cell, facing +z.
    pub fn spawn_camera(&self, fov: f32) -> Camera {
        Camera::new(self.spawn, 0.0, fov)
    }

    /// Whether the point lies inside a block or outside the map.
    pub fn is_solid_at(&self, point: &Vec3) -> bool {
        let col = (point.x / self.cell_size + 0.5).floor();
        let from_bottom = (point.z / self.cell_size + 0.5).floor();
        if col < 0.0 || from_bottom < 0.0 {
            return true;
        }
        let (col, from_bottom) = (col as usize, from_bottom as usize);
        if col >= self.cols || from_bottom >= self.rows {
            return true;
        }
        self.solid[(self.rows - 1 - from_bottom) * self.cols + col]
    }

    /// Whether a circle of `radius` around `point` stays clear of blocks,
    /// sampled at the center and eight points on its rim.
    pub fn is_free_with_radius(&self, point: &Vec3, radius: f32) -> bool {
        let d = radius * std::f32::consts::FRAC_1_SQRT_2;
        let offsets = [
            (0.0, 0.0),
            (radius, 0.0),
            (-radius, 0.0),
            (0.0, radius),
            (0.0, -radius),
            (d, d),
            (-d, d),
            (d, -d),
            (-d, -d),
        ];
        offsets
            .iter()
            .all(|&(dx, dz)| !self.is_solid_at(&(point + Vec3::new(dx, 0.0, dz))))
    }

    pub fn face_count(&self) -> usize {
        self.meshes.iter().map(|m| m.faces.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_places_blocks_on_grid() {
        let level = Level::parse("#..\n.S2\n", 10.0).unwrap();
        assert_eq!((level.rows, level.cols), (2, 3));
        // Two pillars plus the enclosing room.
        assert_eq!(level.meshes.len(), 3);
        assert_eq!(level.meshes[0].position, Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(level.meshes[0].faces[0].color, STONE);
        assert_eq!(level.meshes[1].position, Vec3::new(20.0, 0.0, 0.0));
        assert_eq!(level.meshes[1].faces[0].color, PALETTE[1]);
        assert_eq!(level.spawn, Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_room_encloses_grid() {
        let level = Level::parse("...\n...\n", 10.0).unwrap();
        let room = level.meshes.last().unwrap();
        assert_eq!(room.position, Vec3::new(10.0, 0.0, 5.0));
        let xs: Vec<f32> = room.faces.iter().map(|f| f.p1.x + room.position.x).collect();
        assert!(xs.iter().all(|&x| x == -5.0 || x == 25.0), "{xs:?}");
    }

    #[test]
    fn test_ragged_rows_and_blank_edges() {
        let level = Level::parse("\n\n#\n...#\n\n", 10.0).unwrap();
        assert_eq!((level.rows, level.cols), (2, 4));
    }

    #[test]
    fn test_missing_spawn_defaults_to_middle() {
        let level = Level::parse("...\n...\n...\n", 10.0).unwrap();
        assert_eq!(level.spawn, Vec3::new(10.0, 0.0, 10.0));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(Level::parse("  \n\n", 10.0), Err(LevelError::Empty)));
        assert!(matches!(
            Level::parse("..\n.x\n", 10.0),
            Err(LevelError::UnknownTile { tile: 'x', row: 1, col: 1 })
        ));
        assert!(matches!(
            Level::parse("S.S\n", 10.0),
            Err(LevelError::DuplicateSpawn { row: 0, col: 2 })
        ));
    }

    #[test]
    fn test_missing_spawn_avoids_blocked_middle() {
        let level = Level::parse("...\n.#.\n...\n", 10.0).unwrap();
        assert!(!level.is_solid_at(&level.spawn));
        let offset = level.spawn - Vec3::new(10.0, 0.0, 10.0);
        assert!((offset.norm() - 10.0).abs() < 1e-5, "{:?}", level.spawn);
    }

    #[test]
    fn test_solid_lookup() {
        let level = Level::parse("#..\n.S2\n", 10.0).unwrap();
        assert!(level.is_solid_at(&Vec3::new(0.0, 0.0, 10.0)));
        assert!(level.is_solid_at(&Vec3::new(4.0, 0.0, 14.0)));
        assert!(!level.is_solid_at(&Vec3::new(10.0, 0.0, 0.0)));
        assert!(level.is_solid_at(&Vec3::new(20.0, 0.0, 0.0)));
        // Outside the grid counts as solid.
        assert!(level.is_solid_at(&Vec3::new(-6.0, 0.0, 0.0)));
        assert!(level.is_solid_at(&Vec3::new(10.0, 0.0, 16.0)));
    }

    #[test]
    fn test_free_with_radius() {
        let level = Level::parse("#..\n.S2\n", 10.0).unwrap();
        let spawn = level.spawn;
        assert!(level.is_free_with_radius(&spawn, 2.0));
        // Reaches into the block on the right.
        assert!(!level.is_free_with_radius(&spawn, 6.0));
    }

    #[test]
    fn test_demo_map_parses() {
        let level = Level::demo().unwrap();
        assert_eq!(level.cols, 16);
        assert_eq!(level.rows, 9);
        assert_eq!(level.face_count(), level.meshes.len() * 4);
        let camera = level.spawn_camera(200.0);
        assert_eq!(camera.position, level.spawn);
        assert_eq!(camera.fov, 200.0);
    }
}
