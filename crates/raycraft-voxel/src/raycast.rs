//! Amanatides-Woo grid traversal.

use glam::{IVec3, Vec3};
use raycraft_core::{Axis, BlockId, Face, Ray};

use crate::grid::VoxelGrid;

/// One cell visited by a [`GridTraversal`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraversalStep {
    /// Cell entered
    pub cell: IVec3,
    /// Ray parameter at which the cell was entered
    pub distance: f32,
    /// Face the ray entered through; `None` for the starting cell
    pub face: Option<Face>,
}

/// Walks every cell a ray passes through, in order.
///
/// The first step is the cell containing the origin. Each following step
/// crosses exactly one cell boundary. Distances are measured in units of the
/// direction vector's length, so pass a normalized direction to get world
/// units. An axis with a zero direction component never advances; when all
/// three are zero the traversal ends after the starting cell.
///
/// When two boundaries are crossed at the same distance the step is taken
/// along Y first, then X, then Z.
#[derive(Clone, Debug)]
pub struct GridTraversal {
    cell: IVec3,
    step: IVec3,
    t_max: Vec3,
    t_delta: Vec3,
    started: bool,
}

impl GridTraversal {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        let cell = origin.floor().as_ivec3();
        let mut step = IVec3::ZERO;
        let mut t_max = Vec3::INFINITY;
        let mut t_delta = Vec3::INFINITY;

        for axis in Axis::ALL {
            let i = axis.index();
            let d = direction[i];
            if d > 0.0 {
                step[i] = 1;
                t_delta[i] = 1.0 / d;
                t_max[i] = (cell[i] as f32 + 1.0 - origin[i]) / d;
            } else if d < 0.0 {
                step[i] = -1;
                t_delta[i] = -1.0 / d;
                t_max[i] = (origin[i] - cell[i] as f32) / -d;
            }
        }

        Self {
            cell,
            step,
            t_max,
            t_delta,
            started: false,
        }
    }

    /// Cell the traversal currently sits in.
    #[inline]
    pub const fn cell(&self) -> IVec3 {
        self.cell
    }

    fn next_axis(&self) -> Axis {
        let t = self.t_max;
        if t.y <= t.x && t.y <= t.z {
            Axis::Y
        } else if t.x <= t.z {
            Axis::X
        } else {
            Axis::Z
        }
    }
}

impl Iterator for GridTraversal {
    type Item = TraversalStep;

    fn next(&mut self) -> Option<TraversalStep> {
        if !self.started {
            self.started = true;
            return Some(TraversalStep {
                cell: self.cell,
                distance: 0.0,
                face: None,
            });
        }

        let axis = self.next_axis();
        let i = axis.index();
        let distance = self.t_max[i];
        if !distance.is_finite() {
            return None;
        }

        self.cell[i] += self.step[i];
        self.t_max[i] += self.t_delta[i];

        Some(TraversalStep {
            cell: self.cell,
            distance,
            face: Some(Face::entered(axis, self.step[i])),
        })
    }
}

/// First solid cell struck by a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Block occupying the struck cell
    pub block: BlockId,
    /// Struck cell
    pub cell: IVec3,
    /// Point where the ray enters the cell
    pub position: Vec3,
    /// Distance from the ray origin to `position`
    pub distance: f32,
    /// Face the ray entered through
    pub face: Face,
}

impl RayHit {
    /// Cell in front of the struck face, where a new block would go.
    #[inline]
    pub fn adjacent_cell(&self) -> IVec3 {
        self.cell + self.face.normal()
    }

    /// Face index, `axis + 3` when approached from the negative side.
    #[inline]
    pub const fn face_index(&self) -> usize {
        self.face.index()
    }
}

/// Outcome of [`raycast`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RaycastResult {
    NoHit,
    Hit(RayHit),
}

impl RaycastResult {
    #[inline]
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }

    #[inline]
    pub const fn hit(&self) -> Option<&RayHit> {
        match self {
            Self::Hit(hit) => Some(hit),
            Self::NoHit => None,
        }
    }
}

impl From<RaycastResult> for Option<RayHit> {
    fn from(result: RaycastResult) -> Self {
        match result {
            RaycastResult::Hit(hit) => Some(hit),
            RaycastResult::NoHit => None,
        }
    }
}

/// Find the first solid cell along a ray, skipping the cell the ray starts
/// in.
///
/// Returns [`RaycastResult::NoHit`] if the direction is zero, if the ray
/// leaves the grid, or if the next cell lies beyond `max_distance`.
pub fn raycast(grid: &VoxelGrid, origin: Vec3, direction: Vec3, max_distance: f32) -> RaycastResult {
    let Some(ray) = Ray::new(origin, direction) else {
        return RaycastResult::NoHit;
    };

    for step in GridTraversal::new(ray.origin, ray.direction).skip(1) {
        if step.distance > max_distance || !grid.contains(step.cell) {
            break;
        }
        let block = grid.get(step.cell);
        if block.is_air() {
            continue;
        }
        let Some(face) = step.face else {
            continue;
        };
        return RaycastResult::Hit(RayHit {
            block,
            cell: step.cell,
            position: ray.at(step.distance),
            distance: step.distance,
            face,
        });
    }

    RaycastResult::NoHit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridDims;
    use approx::assert_relative_eq;

    fn column_world(height: i32) -> VoxelGrid {
        let mut grid = VoxelGrid::new(GridDims::cube(16)).unwrap();
        for y in 0..height {
            grid.set(IVec3::new(8, y, 8), BlockId::DIRT);
        }
        grid.set(IVec3::new(8, height, 8), BlockId::GRASS);
        grid
    }

    #[test]
    fn traversal_starts_at_origin_cell() {
        let mut walk = GridTraversal::new(Vec3::new(1.5, 2.5, 3.5), Vec3::X);
        let first = walk.next().unwrap();
        assert_eq!(first.cell, IVec3::new(1, 2, 3));
        assert_eq!(first.face, None);
        assert_eq!(first.distance, 0.0);
    }

    #[test]
    fn axis_aligned_ray_never_leaves_its_line() {
        let walk = GridTraversal::new(Vec3::new(0.5, 0.5, 0.5), Vec3::Z);
        for (i, step) in walk.take(10).enumerate() {
            assert_eq!(step.cell, IVec3::new(0, 0, i as i32));
            if i > 0 {
                assert_eq!(step.face, Some(Face::NegZ));
                assert_relative_eq!(step.distance, i as f32 - 0.5);
            }
        }
    }

    #[test]
    fn zero_direction_stops_after_origin() {
        let walk = GridTraversal::new(Vec3::splat(3.2), Vec3::ZERO);
        assert_eq!(walk.count(), 1);
    }

    #[test]
    fn steps_are_face_adjacent() {
        let dir = Vec3::new(0.3, -0.7, 0.64).normalize();
        let walk = GridTraversal::new(Vec3::new(4.1, 9.9, 2.2), dir);
        let steps: Vec<_> = walk.take(40).collect();
        for pair in steps.windows(2) {
            let delta = pair[1].cell - pair[0].cell;
            assert_eq!(delta.abs().element_sum(), 1);
            assert!(pair[1].distance >= pair[0].distance);
            assert_eq!(pair[1].face.map(Face::normal), Some(-delta));
        }
    }

    #[test]
    fn ties_prefer_y_then_x() {
        // Exact diagonal from a cell centre crosses all three planes at once.
        let mut walk = GridTraversal::new(Vec3::splat(0.5), Vec3::ONE);
        walk.next();
        assert_eq!(walk.next().unwrap().face, Some(Face::NegY));
        assert_eq!(walk.next().unwrap().face, Some(Face::NegX));
        assert_eq!(walk.next().unwrap().face, Some(Face::NegZ));
    }

    #[test]
    fn no_hit_through_air() {
        let grid = VoxelGrid::new(GridDims::cube(16)).unwrap();
        let result = raycast(&grid, Vec3::new(1.5, 1.5, 1.5), Vec3::new(1.0, 0.2, 0.7), 5.0);
        assert_eq!(result, RaycastResult::NoHit);
    }

    #[test]
    fn no_hit_beyond_max_distance() {
        let mut grid = VoxelGrid::new(GridDims::cube(16)).unwrap();
        grid.set(IVec3::new(10, 1, 1), BlockId::STONE);
        let origin = Vec3::new(1.5, 1.5, 1.5);
        assert_eq!(raycast(&grid, origin, Vec3::X, 5.0), RaycastResult::NoHit);
        assert!(raycast(&grid, origin, Vec3::X, 9.0).is_hit());
    }

    #[test]
    fn no_hit_for_zero_direction() {
        let grid = column_world(3);
        assert_eq!(
            raycast(&grid, Vec3::new(8.5, 10.0, 8.5), Vec3::ZERO, 20.0),
            RaycastResult::NoHit
        );
    }

    #[test]
    fn downward_ray_hits_top_face() {
        let height = 5;
        let grid = column_world(height);
        let origin = Vec3::new(8.5, 12.25, 8.5);

        let RaycastResult::Hit(hit) = raycast(&grid, origin, Vec3::NEG_Y, 20.0) else {
            panic!("expected a hit");
        };
        assert_eq!(hit.block, BlockId::GRASS);
        assert_eq!(hit.cell, IVec3::new(8, height, 8));
        assert_eq!(hit.face, Face::PosY);
        assert_eq!(hit.face.axis(), Axis::Y);
        assert_eq!(hit.face.approach_sign(), 1);
        assert_eq!(hit.face_index(), 1);
        assert_relative_eq!(hit.position.y, (height + 1) as f32);
        assert_relative_eq!(hit.distance, 12.25 - (height + 1) as f32);
        assert_eq!(hit.adjacent_cell(), IVec3::new(8, height + 1, 8));
    }

    #[test]
    fn upward_ray_hits_bottom_face() {
        let mut grid = VoxelGrid::new(GridDims::cube(16)).unwrap();
        grid.set(IVec3::new(2, 10, 2), BlockId::BRICKS);
        let hit = *raycast(&grid, Vec3::new(2.5, 3.0, 2.5), Vec3::Y, 20.0)
            .hit()
            .unwrap();
        assert_eq!(hit.face, Face::NegY);
        assert_eq!(hit.face_index(), Axis::Y.index() + 3);
        assert_eq!(hit.adjacent_cell(), IVec3::new(2, 9, 2));
    }

    #[test]
    fn origin_cell_is_skipped() {
        let mut grid = VoxelGrid::new(GridDims::cube(8)).unwrap();
        grid.set(IVec3::new(1, 1, 1), BlockId::STONE);
        grid.set(IVec3::new(3, 1, 1), BlockId::WOOD);
        let hit = *raycast(&grid, Vec3::new(1.5, 1.5, 1.5), Vec3::X, 10.0)
            .hit()
            .unwrap();
        assert_eq!(hit.cell, IVec3::new(3, 1, 1));
        assert_eq!(hit.face, Face::NegX);
    }

    #[test]
    fn leaving_grid_is_no_hit() {
        let mut grid = VoxelGrid::new(GridDims::cube(4)).unwrap();
        grid.set(IVec3::new(0, 0, 0), BlockId::STONE);
        let result = raycast(&grid, Vec3::new(2.5, 2.5, 2.5), Vec3::Y, 100.0);
        assert_eq!(result, RaycastResult::NoHit);
    }
}
