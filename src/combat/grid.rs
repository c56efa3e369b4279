//! Combat grid
//!
//! A bounded 2D battle grid with bidirectional occupancy bookkeeping:
//! each cell records its occupant, and a reverse index maps every
//! tracked entity to its cell. All mutation goes through place, remove,
//! and move so the two sides can never drift apart.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::error::CombatError;
use super::RoomId;
use crate::entities::EntityId;

/// Grid dimension limits (inclusive)
pub const MIN_GRID_SIZE: i32 = 3;
pub const MAX_GRID_SIZE: i32 = 20;

/// All eight movement directions, clockwise from north
const DIRECTIONS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Position on the combat grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance (diagonal movement counts as one step)
    pub fn chebyshev_distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

/// The entity standing on a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupant {
    pub entity_id: EntityId,
    pub is_player: bool,
}

/// A single addressable cell of the battle grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridCell {
    position: Position,
    passable: bool,
    occupant: Option<Occupant>,
}

impl GridCell {
    fn new(position: Position) -> Self {
        Self {
            position,
            passable: true,
            occupant: None,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_passable(&self) -> bool {
        self.passable
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn occupant(&self) -> Option<&Occupant> {
        self.occupant.as_ref()
    }

    /// Whether an entity could be placed here right now
    pub fn accepts_placement(&self) -> bool {
        self.passable && self.occupant.is_none()
    }
}

/// A bounded battle grid for one encounter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatGrid {
    width: i32,
    height: i32,
    room_id: Option<RoomId>,
    cells: Vec<GridCell>,
    entity_positions: HashMap<EntityId, Position>,
}

impl CombatGrid {
    /// Create a grid with every cell passable and empty.
    /// Dimensions must lie in `[MIN_GRID_SIZE, MAX_GRID_SIZE]`.
    pub fn new(width: i32, height: i32, room_id: Option<RoomId>) -> Result<Self, CombatError> {
        let valid = (MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&width)
            && (MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&height);
        if !valid {
            return Err(CombatError::InvalidGridSize {
                width,
                height,
                min: MIN_GRID_SIZE,
                max: MAX_GRID_SIZE,
            });
        }

        let mut cells = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(GridCell::new(Position::new(x, y)));
            }
        }

        Ok(Self {
            width,
            height,
            room_id,
            cells,
            entity_positions: HashMap::new(),
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn room_id(&self) -> Option<RoomId> {
        self.room_id
    }

    #[inline]
    fn idx(&self, pos: Position) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    /// Check if a position lies within the grid
    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Check if a position is in bounds, passable, and unoccupied
    pub fn is_valid_position(&self, pos: Position) -> bool {
        self.cell_at(pos).map_or(false, |c| c.accepts_placement())
    }

    /// Get the cell at a position
    pub fn cell_at(&self, pos: Position) -> Option<&GridCell> {
        if self.in_bounds(pos) {
            Some(&self.cells[self.idx(pos)])
        } else {
            None
        }
    }

    /// Get the occupant of a cell, if any
    pub fn occupant_at(&self, pos: Position) -> Option<&Occupant> {
        self.cell_at(pos).and_then(|c| c.occupant())
    }

    /// Mark a cell passable or impassable (terrain setup).
    /// Returns false if the position is out of bounds.
    pub fn set_passable(&mut self, pos: Position, passable: bool) -> bool {
        if !self.in_bounds(pos) {
            return false;
        }
        let idx = self.idx(pos);
        self.cells[idx].passable = passable;
        true
    }

    /// Where a tracked entity currently stands
    pub fn entity_position(&self, id: EntityId) -> Option<Position> {
        self.entity_positions.get(&id).copied()
    }

    /// All tracked entities and their positions
    pub fn entity_positions(&self) -> &HashMap<EntityId, Position> {
        &self.entity_positions
    }

    /// Place an entity on the grid.
    /// Fails (no mutation) if the target is out of bounds, impassable,
    /// occupied, or the entity is already on the board.
    pub fn place_entity(&mut self, id: EntityId, pos: Position, is_player: bool) -> bool {
        // One cell per entity; a second placement would desync the index
        if self.entity_positions.contains_key(&id) {
            return false;
        }
        if !self.is_valid_position(pos) {
            return false;
        }

        let idx = self.idx(pos);
        self.cells[idx].occupant = Some(Occupant {
            entity_id: id,
            is_player,
        });
        self.entity_positions.insert(id, pos);
        true
    }

    /// Remove an entity from the grid. Fails if the id is not tracked.
    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        let pos = match self.entity_positions.remove(&id) {
            Some(p) => p,
            None => return false,
        };
        let idx = self.idx(pos);
        self.cells[idx].occupant = None;
        true
    }

    /// Move a tracked entity to a new cell.
    /// Fails without mutation if the id is untracked or the target is
    /// invalid; a failed destination placement puts the entity back on
    /// its original cell, so a failed move never leaves it off the board.
    pub fn move_entity(&mut self, id: EntityId, new_pos: Position) -> bool {
        let old_pos = match self.entity_positions.get(&id) {
            Some(p) => *p,
            None => return false,
        };
        let old_idx = self.idx(old_pos);
        let occupant = match self.cells[old_idx].occupant.take() {
            Some(o) => o,
            None => return false,
        };
        self.entity_positions.remove(&id);

        if self.place_entity(id, new_pos, occupant.is_player) {
            true
        } else {
            // Rollback: restore the original cell and index entry
            self.cells[old_idx].occupant = Some(occupant);
            self.entity_positions.insert(id, old_pos);
            false
        }
    }

    /// Chebyshev distance between two tracked entities.
    /// None if either is not on the grid.
    pub fn distance_between(&self, a: EntityId, b: EntityId) -> Option<i32> {
        let pa = self.entity_position(a)?;
        let pb = self.entity_position(b)?;
        Some(pa.chebyshev_distance(&pb))
    }

    /// Whether two tracked entities stand exactly one step apart
    pub fn are_adjacent(&self, a: EntityId, b: EntityId) -> bool {
        self.distance_between(a, b) == Some(1)
    }

    /// All tracked entities within `range` steps of `center`.
    /// Recomputed on each call, never cached.
    pub fn entities_in_range(
        &self,
        center: Position,
        range: i32,
    ) -> impl Iterator<Item = EntityId> + '_ {
        self.entity_positions
            .iter()
            .filter(move |(_, pos)| pos.chebyshev_distance(&center) <= range)
            .map(|(id, _)| *id)
    }

    /// The up-to-eight in-bounds neighbour cells of a position,
    /// clockwise from north
    pub fn adjacent_cells(&self, pos: Position) -> Vec<&GridCell> {
        DIRECTIONS
            .iter()
            .filter_map(|(dx, dy)| self.cell_at(Position::new(pos.x + dx, pos.y + dy)))
            .collect()
    }
}
