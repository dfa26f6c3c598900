//! Screen-space projection of sphere tiles.
//!
//! Mirrors the CSS 3D stack the DOM host uses: each tile sits at
//! `rotateY(ry) rotateX(rx) translateZ(R)` inside a sphere transformed by
//! `translate3d(0, 0, -R) rotateX(pitch) rotateY(yaw)`, seen through a
//! perspective of `2R`. Coordinates are CSS-like, with y pointing down.

use nalgebra::{Rotation3, Vector3};

use crate::{
    animation::scheduler::FrameScheduler,
    core::{
        geo::{Point, TileRect},
        rotation::Rotation,
    },
    gallery::DomeGallery,
    layout::{
        geometry::{base_rotation, TileAngles},
        tiles::Tile,
    },
};

/// A tile as it appears on screen
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedTile {
    pub index: usize,
    /// Centre in viewport pixels
    pub center: Point,
    /// Perspective scale, 1.0 on the screen plane
    pub scale: f64,
    /// Z of the tile centre; larger is closer to the viewer
    pub depth: f64,
    pub rect: TileRect,
    /// Whether the front face points at the viewer
    pub facing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub viewport: Point,
    pub radius: f64,
    pub perspective: f64,
}

impl Projection {
    pub fn new(width: f64, height: f64, radius: f64) -> Self {
        Self {
            viewport: Point::new(width, height),
            radius,
            perspective: radius * 2.0,
        }
    }

    pub fn with_perspective(mut self, perspective: f64) -> Self {
        self.perspective = perspective;
        self
    }

    fn rotate_x(deg: f64) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&Vector3::x_axis(), deg.to_radians())
    }

    fn rotate_y(deg: f64) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&Vector3::y_axis(), deg.to_radians())
    }

    /// Position of a tile centre relative to the sphere centre, and its
    /// outward normal
    fn orient(&self, angles: TileAngles, rotation: Rotation) -> (Vector3<f64>, Vector3<f64>) {
        let sphere = Self::rotate_x(rotation.pitch) * Self::rotate_y(rotation.yaw);
        let tile = Self::rotate_y(angles.rotate_y) * Self::rotate_x(angles.rotate_x);
        let normal = sphere * tile * Vector3::z();
        (normal * self.radius, normal)
    }

    /// Projects one tile with the given resting angles.
    ///
    /// `size` is the tile's edge length on the sphere in pixels. Returns
    /// `None` when the tile is behind the viewer.
    pub fn project_angles(
        &self,
        index: usize,
        angles: TileAngles,
        size: Point,
        rotation: Rotation,
    ) -> Option<ProjectedTile> {
        let (offset, normal) = self.orient(angles, rotation);
        let z = offset.z - self.radius;
        if z >= self.perspective {
            return None;
        }

        let scale = self.perspective / (self.perspective - z);
        let center = Point::new(
            self.viewport.x / 2.0 + offset.x * scale,
            self.viewport.y / 2.0 + offset.y * scale,
        );

        Some(ProjectedTile {
            index,
            center,
            scale,
            depth: z,
            rect: TileRect::new(center.x, center.y, size.x * scale, size.y * scale),
            facing: normal.z > 0.0,
        })
    }

    /// Edge lengths of a tile on a sphere cut into `segments` columns
    pub fn tile_size(&self, tile: &Tile, segments: u32) -> Point {
        let unit_arc = std::f64::consts::PI * self.radius / segments.max(1) as f64;
        Point::new(
            unit_arc * tile.size_x as f64,
            unit_arc * tile.size_y as f64,
        )
    }

    /// Projects every visible tile, ordered back to front for painting
    pub fn project_tiles(
        &self,
        tiles: &[Tile],
        segments: u32,
        rotation: Rotation,
    ) -> Vec<ProjectedTile> {
        let mut projected: Vec<ProjectedTile> = tiles
            .iter()
            .enumerate()
            .filter_map(|(index, tile)| {
                let angles = base_rotation(&tile.slot(), segments);
                self.project_angles(index, angles, self.tile_size(tile, segments), rotation)
            })
            .filter(|tile| tile.facing)
            .collect();

        projected.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        projected
    }
}

/// Front-most tile under `point`, from a back-to-front list
pub fn hit_test(projected: &[ProjectedTile], point: Point) -> Option<&ProjectedTile> {
    projected
        .iter()
        .rev()
        .find(|tile| tile.facing && tile.rect.contains(&point))
}

impl<S: FrameScheduler> DomeGallery<S> {
    /// Visible tiles for a viewport of `width` × `height`, back to front
    pub fn project(&self, width: f64, height: f64) -> Vec<ProjectedTile> {
        Projection::new(width, height, self.radius()).project_tiles(
            self.tiles(),
            self.config().layout.segments,
            self.rotation(),
        )
    }
}
