//! # Floor Layout
//!
//! Places rooms from a fixed template per floor role. Each floor gets a
//! bounding square whose side grows with the square root of the floor's area
//! share; every room sits at a fractional position and size of that side.
//!
//! ```text
//! share = area / floors
//! side  = √share × scale          (ft; scale 3 converts sq yd, 1 for sq ft)
//! room  = (x·side, y·side, w·side, h·side)
//! ```
//!
//! Templates are laid out so rooms never overlap. [`LayoutPlan::validate`]
//! checks the geometry independently so layouts from other sources can be
//! held to the same rules.
//!
//! ## Room Numbering
//!
//! Bedrooms and bathrooms are numbered across the whole building: the
//! ground floor holds `Bedroom 1`, floor 1 holds `Bedroom 2` and `Bedroom 3`,
//! and so on.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::presets::{EstimationPreset, RoomKind, RoomTemplate};
use crate::project::{ProjectConfig, RoomProgram};

/// Relative tolerance for touching room edges
const EDGE_EPSILON: f64 = 1e-9;

/// Axis-aligned room rectangle in feet, origin at the floor's corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
}

impl Room {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    fn overlaps(&self, other: &Room, epsilon: f64) -> bool {
        self.x < other.x + other.width - epsilon
            && other.x < self.x + self.width - epsilon
            && self.y < other.y + other.height - epsilon
            && other.y < self.y + self.height - epsilon
    }
}

/// Rooms on one floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorLayout {
    /// 0 is the ground floor
    pub floor: u32,
    pub label: String,

    /// Bounding square side in feet
    pub side: f64,

    /// Floor's share of the built-up area, in the preset's area unit
    pub area_share: f64,

    /// Area available to rooms in square feet (side²)
    pub allotted_area: f64,

    pub rooms: Vec<Room>,
}

impl FloorLayout {
    /// Sum of room rectangle areas
    pub fn occupied_area(&self) -> f64 {
        self.rooms.iter().map(Room::area).sum()
    }

    pub fn room(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.name == name)
    }
}

/// Layout for every floor plus a short description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPlan {
    pub floors: Vec<FloorLayout>,
    pub explanation: String,
}

/// Reason a layout fails geometric validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutViolation {
    #[error("Expected {expected} floors, layout has {actual}")]
    FloorCountMismatch { expected: usize, actual: usize },

    #[error("Floor {floor} has no rooms")]
    EmptyFloor { floor: u32 },

    #[error("Room '{room}' on floor {floor} has an invalid size or position")]
    InvalidRoom { floor: u32, room: String },

    #[error("Room '{room}' on floor {floor} lies outside the {side:.1} ft bounding square")]
    OutOfBounds { floor: u32, room: String, side: f64 },

    #[error("Rooms '{first}' and '{second}' overlap on floor {floor}")]
    Overlap { floor: u32, first: String, second: String },

    #[error("Floor {floor} occupies {occupied:.1} sq ft, more than {limit:.1} sq ft allowed")]
    AreaExceeded { floor: u32, occupied: f64, limit: f64 },

    #[error("Layout explanation is empty")]
    MissingExplanation,
}

impl LayoutPlan {
    /// Lay out every floor of a project from the preset templates.
    pub fn generate(config: &ProjectConfig, preset: &EstimationPreset) -> LayoutPlan {
        let rules = &preset.layout;
        let share = config.area_per_floor();
        let side = share.sqrt() * rules.scale;
        let mut counter = RoomCounter::default();

        let floors = (0..config.floors)
            .map(|floor| {
                let template = if floor == 0 { &rules.ground_floor } else { &rules.upper_floor };
                let rooms = template
                    .iter()
                    .filter(|t| included(t.kind, &config.room_program))
                    .map(|t| place(t, side, &mut counter))
                    .collect();

                FloorLayout {
                    floor,
                    label: floor_label(floor),
                    side,
                    area_share: share,
                    allotted_area: side * side,
                    rooms,
                }
            })
            .collect();

        LayoutPlan {
            floors,
            explanation: explain(config, preset, side),
        }
    }

    /// Check this layout against its own floor dimensions.
    pub fn validate(&self, slack: f64) -> Result<(), LayoutViolation> {
        self.validate_against(self, slack)
    }

    /// Check this layout against the floor dimensions of `reference`.
    ///
    /// Floors are matched by position. Every room must have a finite,
    /// positive size, sit inside the reference bounding square and not
    /// overlap another room; occupied area may exceed the reference allotment
    /// by at most `slack`.
    pub fn validate_against(&self, reference: &LayoutPlan, slack: f64) -> Result<(), LayoutViolation> {
        if self.floors.len() != reference.floors.len() {
            return Err(LayoutViolation::FloorCountMismatch {
                expected: reference.floors.len(),
                actual: self.floors.len(),
            });
        }
        if self.explanation.trim().is_empty() {
            return Err(LayoutViolation::MissingExplanation);
        }

        for (floor, bounds) in self.floors.iter().zip(reference.floors.iter()) {
            check_floor(floor, bounds.side, bounds.allotted_area, slack)?;
        }
        Ok(())
    }
}

fn check_floor(floor: &FloorLayout, side: f64, allotted: f64, slack: f64) -> Result<(), LayoutViolation> {
    if floor.rooms.is_empty() {
        return Err(LayoutViolation::EmptyFloor { floor: floor.floor });
    }

    let epsilon = EDGE_EPSILON * side.max(1.0);
    for room in &floor.rooms {
        let finite = [room.x, room.y, room.width, room.height].iter().all(|v| v.is_finite());
        if !finite || room.width <= 0.0 || room.height <= 0.0 || room.x < -epsilon || room.y < -epsilon {
            return Err(LayoutViolation::InvalidRoom {
                floor: floor.floor,
                room: room.name.clone(),
            });
        }
        if room.x + room.width > side + epsilon || room.y + room.height > side + epsilon {
            return Err(LayoutViolation::OutOfBounds {
                floor: floor.floor,
                room: room.name.clone(),
                side,
            });
        }
    }

    for (i, first) in floor.rooms.iter().enumerate() {
        for second in &floor.rooms[i + 1..] {
            if first.overlaps(second, epsilon) {
                return Err(LayoutViolation::Overlap {
                    floor: floor.floor,
                    first: first.name.clone(),
                    second: second.name.clone(),
                });
            }
        }
    }

    let occupied = floor.occupied_area();
    let limit = allotted * (1.0 + slack);
    if occupied > limit {
        return Err(LayoutViolation::AreaExceeded {
            floor: floor.floor,
            occupied,
            limit,
        });
    }
    Ok(())
}

pub fn floor_label(floor: u32) -> String {
    if floor == 0 {
        "Ground Floor".to_string()
    } else {
        format!("Floor {}", floor)
    }
}

fn included(kind: RoomKind, program: &RoomProgram) -> bool {
    match kind {
        RoomKind::Dining => program.dining_room,
        RoomKind::Staircase => program.staircase,
        RoomKind::Balcony => program.balcony,
        _ => true,
    }
}

#[derive(Default)]
struct RoomCounter {
    bedrooms: u32,
    bathrooms: u32,
}

impl RoomCounter {
    fn name(&mut self, kind: RoomKind) -> String {
        let next = match kind {
            RoomKind::Bedroom => &mut self.bedrooms,
            RoomKind::Bathroom => &mut self.bathrooms,
            _ => return kind.base_name().to_string(),
        };
        *next += 1;
        format!("{} {}", kind.base_name(), next)
    }
}

fn place(template: &RoomTemplate, side: f64, counter: &mut RoomCounter) -> Room {
    Room {
        name: counter.name(template.kind),
        width: template.width * side,
        height: template.height * side,
        x: template.x * side,
        y: template.y * side,
    }
}

fn explain(config: &ProjectConfig, preset: &EstimationPreset, side: f64) -> String {
    let mut ground = vec!["living room", "kitchen"];
    if config.room_program.dining_room {
        ground.push("dining");
    }
    ground.extend(["a bedroom", "a bathroom"]);

    let mut text = format!(
        "{} layout on a {:.1} ft square per floor ({:.0} {} each). Ground floor: {}.",
        config.floors_label(),
        side,
        config.area_per_floor(),
        preset.area_unit.label(),
        ground.join(", "),
    );
    if config.floors > 1 {
        let balcony = if config.room_program.balcony { ", balcony" } else { "" };
        text.push_str(&format!(" Upper floors: two bedrooms, a bathroom{}.", balcony));
    }
    if config.room_program.staircase {
        text.push_str(" A staircase core is kept in the same position on every floor.");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectInput;

    fn config(area: f64, floors: i64) -> ProjectConfig {
        ProjectInput::new(area, floors, "Urban")
            .normalize(EstimationPreset::standard())
            .unwrap()
    }

    fn plan(area: f64, floors: i64) -> LayoutPlan {
        LayoutPlan::generate(&config(area, floors), EstimationPreset::standard())
    }

    #[test]
    fn test_ground_floor_rooms() {
        let layout = plan(1000.0, 3);
        assert_eq!(layout.floors.len(), 3);

        let ground = &layout.floors[0];
        assert_eq!(ground.label, "Ground Floor");
        assert_eq!(ground.rooms[0].name, "Living Room");
        assert!(ground.room("Kitchen").is_some());
        assert!(ground.room("Bedroom 1").is_some());
        assert!(ground.room("Bathroom 1").is_some());
    }

    #[test]
    fn test_side_from_area_share() {
        let layout = plan(900.0, 1);
        // √900 × 3 = 90 ft
        assert!((layout.floors[0].side - 90.0).abs() < 1e-9);
        assert!((layout.floors[0].allotted_area - 8100.0).abs() < 1e-6);
        let living = layout.floors[0].room("Living Room").unwrap();
        assert!((living.width - 31.5).abs() < 1e-9);
        assert!((living.height - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_building_wide_numbering() {
        let layout = plan(1200.0, 3);
        let names: Vec<Vec<&str>> = layout
            .floors
            .iter()
            .map(|f| f.rooms.iter().map(|r| r.name.as_str()).collect())
            .collect();

        assert!(names[1].contains(&"Bedroom 2"));
        assert!(names[1].contains(&"Bedroom 3"));
        assert!(names[1].contains(&"Bathroom 2"));
        assert!(names[2].contains(&"Bedroom 4"));
        assert!(names[2].contains(&"Bedroom 5"));
        assert!(names[2].contains(&"Bathroom 3"));
        assert_eq!(layout.floors[2].label, "Floor 2");
    }

    #[test]
    fn test_room_program_drops_optional_rooms() {
        let mut config = config(1000.0, 2);
        config.room_program.dining_room = false;
        config.room_program.balcony = false;
        config.room_program.staircase = false;
        let layout = LayoutPlan::generate(&config, EstimationPreset::standard());

        assert!(layout.floors[0].room("Dining").is_none());
        assert!(layout.floors[0].room("Staircase").is_none());
        assert!(layout.floors[1].room("Balcony").is_none());
        assert_eq!(layout.floors[1].rooms.len(), 3);
        assert!(layout.validate(0.05).is_ok());
    }

    #[test]
    fn test_generated_layouts_validate() {
        for (area, floors) in [(0.01, 1), (50.0, 2), (1000.0, 3), (5000.0, 7)] {
            let layout = plan(area, floors);
            assert!(layout.validate(0.05).is_ok(), "area {} floors {}", area, floors);
            for floor in &layout.floors {
                assert!(floor.occupied_area() <= floor.allotted_area * 1.05);
            }
        }
    }

    #[test]
    fn test_compact_scale() {
        let config = ProjectInput::new(1600.0, 1, "Urban")
            .normalize(EstimationPreset::compact())
            .unwrap();
        let layout = LayoutPlan::generate(&config, EstimationPreset::compact());
        assert!((layout.floors[0].side - 40.0).abs() < 1e-9);
        assert!(layout.explanation.contains("sq ft"));
    }

    #[test]
    fn test_detects_overlap() {
        let mut layout = plan(1000.0, 1);
        let kitchen_x = layout.floors[0].room("Kitchen").unwrap().x;
        layout.floors[0].rooms[0].width = kitchen_x + 5.0;
        assert!(matches!(
            layout.validate(0.05),
            Err(LayoutViolation::Overlap { .. })
        ));
    }

    #[test]
    fn test_detects_out_of_bounds_and_bad_sizes() {
        let reference = plan(1000.0, 1);

        let mut outside = reference.clone();
        outside.floors[0].rooms[4].x = reference.floors[0].side;
        assert!(matches!(
            outside.validate_against(&reference, 0.05),
            Err(LayoutViolation::OutOfBounds { .. })
        ));

        let mut negative = reference.clone();
        negative.floors[0].rooms[0].height = -1.0;
        assert!(matches!(
            negative.validate_against(&reference, 0.05),
            Err(LayoutViolation::InvalidRoom { .. })
        ));

        let mut nan = reference.clone();
        nan.floors[0].rooms[0].x = f64::NAN;
        assert!(matches!(
            nan.validate_against(&reference, 0.05),
            Err(LayoutViolation::InvalidRoom { .. })
        ));
    }

    #[test]
    fn test_detects_structural_mismatch() {
        let reference = plan(1000.0, 2);

        let mut short = reference.clone();
        short.floors.pop();
        assert_eq!(
            short.validate_against(&reference, 0.05),
            Err(LayoutViolation::FloorCountMismatch { expected: 2, actual: 1 })
        );

        let mut empty = reference.clone();
        empty.floors[1].rooms.clear();
        assert_eq!(
            empty.validate_against(&reference, 0.05),
            Err(LayoutViolation::EmptyFloor { floor: 1 })
        );

        let mut silent = reference.clone();
        silent.explanation = "  ".to_string();
        assert_eq!(
            silent.validate_against(&reference, 0.05),
            Err(LayoutViolation::MissingExplanation)
        );
    }

    #[test]
    fn test_detects_area_overrun() {
        let reference = plan(400.0, 1);
        let side = reference.floors[0].side;
        let mut packed = reference.clone();
        packed.floors[0].rooms = vec![Room {
            name: "Hall".to_string(),
            width: side,
            height: side,
            x: 0.0,
            y: 0.0,
        }];
        // Fills the square exactly, within slack
        assert!(packed.validate_against(&reference, 0.05).is_ok());

        let mut shrunk = reference.clone();
        for floor in &mut shrunk.floors {
            floor.allotted_area *= 0.5;
        }
        assert!(matches!(
            packed.validate_against(&shrunk, 0.05),
            Err(LayoutViolation::AreaExceeded { .. })
        ));
    }
}
