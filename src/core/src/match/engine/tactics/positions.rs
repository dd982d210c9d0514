use crate::r#match::{MatchField, PlayerSide};
use nalgebra::Vector2;

/// Pitch size the classic layout offsets were authored against.
const REFERENCE_WIDTH: f32 = 840.0;
const REFERENCE_HEIGHT: f32 = 460.0;

/// Five-a-side layout as (depth from own goal line, offset from centre line)
/// in reference units: keeper, two defenders, midfielder, forward.
pub const CLASSIC_FIVE: [(f32, f32); 5] = [
    (80.0, 0.0),
    (200.0, -100.0),
    (200.0, 100.0),
    (350.0, -60.0),
    (450.0, 0.0),
];

const KEEPER_DEPTH: f32 = 80.0;
const HALFWAY_MARGIN: f32 = 30.0;
const LINE_SPREAD: f32 = 0.2;

pub struct FormationSlots;

impl FormationSlots {
    /// Kickoff positions for one side, index-aligned with the squad.
    pub fn kickoff(field: &MatchField, side: PlayerSide, squad_size: usize) -> Vec<Vector2<f32>> {
        let offsets: Vec<(f32, f32)> = if squad_size == CLASSIC_FIVE.len() {
            CLASSIC_FIVE
                .iter()
                .map(|(depth, lateral)| {
                    (
                        depth * field.width / REFERENCE_WIDTH,
                        lateral * field.height / REFERENCE_HEIGHT,
                    )
                })
                .collect()
        } else {
            Self::spread_offsets(field, squad_size)
        };

        offsets
            .into_iter()
            .map(|(depth, lateral)| Self::to_field(field, side, depth, lateral))
            .collect()
    }

    /// Holding position used by the computer side when a teammate has the ball:
    /// a column in its own half with the squad spread evenly top to bottom.
    pub fn holding(field: &MatchField, side: PlayerSide, index: usize, squad_size: usize) -> Vector2<f32> {
        let column = match side {
            PlayerSide::Left => 0.35,
            PlayerSide::Right => 0.65,
        };

        let spread = (squad_size.saturating_sub(1)).max(1) as f32;
        let row = 0.2 + 0.6 * (index as f32 / spread);

        Vector2::new(
            field.left + field.width * column,
            field.top + field.height * row,
        )
    }

    fn spread_offsets(field: &MatchField, squad_size: usize) -> Vec<(f32, f32)> {
        let keeper_depth = KEEPER_DEPTH * field.width / REFERENCE_WIDTH;
        let last_depth = field.width / 2.0 - HALFWAY_MARGIN * field.width / REFERENCE_WIDTH;
        let step = (last_depth - keeper_depth) / (squad_size.saturating_sub(1)).max(1) as f32;

        (0..squad_size)
            .map(|index| {
                let lateral = match index {
                    0 => 0.0,
                    i if i % 2 == 1 => -field.height * LINE_SPREAD,
                    _ => field.height * LINE_SPREAD,
                };

                (keeper_depth + step * index as f32, lateral)
            })
            .collect()
    }

    fn to_field(field: &MatchField, side: PlayerSide, depth: f32, lateral: f32) -> Vector2<f32> {
        let center = field.center();

        let position = match side {
            PlayerSide::Left => Vector2::new(field.left + depth, center.y + lateral),
            PlayerSide::Right => Vector2::new(field.right() - depth, center.y - lateral),
        };

        field.clamp_player(position)
    }
}
