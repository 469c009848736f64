//! Slot grid for a cabinet container.

use serde::Serialize;
use th_core::entities::{Animal, HousingContainer, HousingSlot};

/// One grid position. `slot_id` is `None` where no slot has been created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CabinetCell {
    pub column: u32,
    pub row: u32,
    pub slot_id: Option<String>,
    /// Display names of animals housed in the slot.
    pub occupants: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CabinetGrid {
    pub container_id: String,
    pub columns: u32,
    pub rows: u32,
    /// Row-major: all columns of row 0, then row 1, and so on.
    pub cells: Vec<CabinetCell>,
}

impl CabinetGrid {
    #[must_use]
    pub fn cell(&self, column: u32, row: u32) -> Option<&CabinetCell> {
        self.cells
            .iter()
            .find(|cell| cell.column == column && cell.row == row)
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[CabinetCell]> {
        let width = usize::try_from(self.columns).unwrap_or(usize::MAX).max(1);
        self.cells.chunks(width)
    }
}

/// Lay out the slots of `container` as a dense grid sized by the largest
/// column and row index in use.
///
/// Slots of other containers are ignored, as are slots whose column or row
/// exceeds [`HousingSlot::MAX_INDEX`]. A `box` container, or a cabinet
/// without slots, yields a grid with no cells.
#[must_use]
pub fn cabinet_grid(container: &HousingContainer, slots: &[HousingSlot], animals: &[Animal]) -> CabinetGrid {
    let own: Vec<&HousingSlot> = if container.kind.has_slots() {
        slots
            .iter()
            .filter(|slot| slot.container_id == container.id && HousingSlot::in_bounds(slot.column, slot.row))
            .collect()
    } else {
        Vec::new()
    };

    let columns = own.iter().map(|slot| slot.column.saturating_add(1)).max().unwrap_or(0);
    let rows = own.iter().map(|slot| slot.row.saturating_add(1)).max().unwrap_or(0);

    let mut cells = Vec::new();
    for row in 0..rows {
        for column in 0..columns {
            let slot = own.iter().find(|slot| slot.column == column && slot.row == row);
            let occupants = slot.map_or_else(Vec::new, |slot| {
                animals
                    .iter()
                    .filter(|animal| animal.slot_id.as_deref() == Some(slot.id.as_str()))
                    .map(|animal| {
                        if animal.name.is_empty() {
                            animal.id.clone()
                        } else {
                            animal.name.clone()
                        }
                    })
                    .collect()
            });
            cells.push(CabinetCell {
                column,
                row,
                slot_id: slot.map(|slot| slot.id.clone()),
                occupants,
            });
        }
    }

    CabinetGrid {
        container_id: container.id.clone(),
        columns,
        rows,
        cells,
    }
}
