/// Root container of everything drawn each frame

use super::grid::GridGroup;
use super::shape::ShapeInstance;

#[derive(Debug, Default)]
pub struct SceneGraph {
    shapes: Vec<ShapeInstance>,
    grid: Option<GridGroup>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a shape to the root
    pub fn add_shape(&mut self, shape: ShapeInstance) {
        self.shapes.push(shape);
    }

    pub fn shapes(&self) -> &[ShapeInstance] {
        &self.shapes
    }

    pub fn shapes_mut(&mut self) -> &mut [ShapeInstance] {
        &mut self.shapes
    }

    /// Attach the grid group, returning the one it replaces
    pub fn set_grid(&mut self, grid: GridGroup) -> Option<GridGroup> {
        self.grid.replace(grid)
    }

    pub fn grid(&self) -> Option<&GridGroup> {
        self.grid.as_ref()
    }

    pub fn grid_mut(&mut self) -> Option<&mut GridGroup> {
        self.grid.as_mut()
    }

    /// Detach the grid group
    pub fn take_grid(&mut self) -> Option<GridGroup> {
        self.grid.take()
    }

    /// Detach every shape
    pub fn clear_shapes(&mut self) {
        self.shapes.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty() && self.grid.is_none()
    }
}
