use crate::engine::{BracketError, BracketSnapshot, BracketStage, Round};
use crate::types::{PlayerId, UNRESOLVED};
use serde::{Deserialize, Serialize};

pub const BOX_WIDTH: u32 = 100;
pub const BOX_HEIGHT: u32 = 50;
pub const PADDING_X: u32 = 20;
pub const PADDING_Y: u32 = 20;

/// How a box should be styled by the drawing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoxRole {
    Normal,
    Champion,
}

/// One positioned player box. Text rasterization and wrapping are left to
/// the consumer, the layout only carries the display string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxSpec {
    pub text: String,
    pub role: BoxRole,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoxSpec {
    pub fn center_y(&self) -> u32 {
        self.y + self.height / 2
    }
}

/// An axis-aligned polyline joining two sibling boxes to their parent slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connector {
    pub points: Vec<(u32, u32)>,
}

/// The full renderable description of a bracket: for every round (plus the
/// final champion slot) the positioned boxes, and the connector lines between
/// adjacent rounds. Purely descriptive, nothing here draws pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketGeometry {
    pub width: u32,
    pub height: u32,
    pub rounds: Vec<Vec<BoxSpec>>,
    pub connectors: Vec<Connector>,
}

/// Computes box positions and connector paths for a bracket snapshot.
///
/// Rounds the tournament has not reached yet are synthesized as all-sentinel
/// placeholders so the geometry always spans the full tree, `2^(R-i-1)`
/// matches at round `i` plus the single champion slot.
///
/// Round 0 boxes sit on a fixed vertical grid; every later box sits at the
/// average of its two children's vertical centers, which is also exactly
/// where the connector stub between the siblings terminates.
pub fn compute(snapshot: &BracketSnapshot) -> Result<BracketGeometry, BracketError> {
    validate(snapshot)?;

    let round_count = snapshot.round_count;
    let width = (round_count as u32 + 1) * (BOX_WIDTH + PADDING_X) + PADDING_X;
    let height = (1u32 << round_count) * (BOX_HEIGHT + PADDING_Y) + PADDING_Y;

    let mut rounds = Vec::with_capacity(round_count + 1);
    let mut connectors = vec![];
    // One entry per match of the round just laid out: the top of the parent
    // box it feeds in the next round.
    let mut parent_tops: Vec<u32> = vec![];

    for index in 0..round_count {
        let round = round_at(snapshot, index);
        let x = round_x(index);
        let mut boxes = Vec::with_capacity(round.len() * 2);
        let mut next_parent_tops = Vec::with_capacity(round.len());

        for (k, pair) in round.matches().iter().enumerate() {
            let (top_home, top_away) = if index == 0 {
                (grid_top(2 * k), grid_top(2 * k + 1))
            } else {
                (parent_tops[2 * k], parent_tops[2 * k + 1])
            };
            let parent_top = (top_home + top_away) / 2;
            next_parent_tops.push(parent_top);

            let center_home = top_home + BOX_HEIGHT / 2;
            let center_away = top_away + BOX_HEIGHT / 2;
            let elbow_x = x + BOX_WIDTH + PADDING_X / 2;

            // The bracket shape joining the two siblings...
            connectors.push(Connector {
                points: vec![
                    (x + BOX_WIDTH, center_home),
                    (elbow_x, center_home),
                    (elbow_x, center_away),
                    (x + BOX_WIDTH, center_away),
                ],
            });
            // ...and the stub into the parent box of the next round.
            connectors.push(Connector {
                points: vec![
                    (elbow_x, parent_top + BOX_HEIGHT / 2),
                    (x + BOX_WIDTH + PADDING_X, parent_top + BOX_HEIGHT / 2),
                ],
            });

            boxes.push(player_box(snapshot, pair.home, x, top_home));
            boxes.push(player_box(snapshot, pair.away, x, top_away));
        }

        rounds.push(boxes);
        parent_tops = next_parent_tops;
    }

    // The champion slot, vertically centered between the two finalists.
    let champion = match snapshot.stage {
        BracketStage::Champion(player) => player,
        BracketStage::Playing(_) => UNRESOLVED,
    };
    rounds.push(vec![BoxSpec {
        text: snapshot.name_of(champion).to_string(),
        role: BoxRole::Champion,
        x: round_x(round_count),
        y: parent_tops[0],
        width: BOX_WIDTH,
        height: BOX_HEIGHT,
    }]);

    Ok(BracketGeometry {
        width,
        height,
        rounds,
        connectors,
    })
}

/// The fully realized round at `index`, whatever its state: resolved rounds
/// come from history, the live round from the snapshot stage, and rounds not
/// yet determined become all-sentinel placeholder pairs of the right size.
fn round_at(snapshot: &BracketSnapshot, index: usize) -> Round {
    if let Some(round) = snapshot.history.get(index) {
        return round.clone();
    }
    if index == snapshot.history.len() {
        if let BracketStage::Playing(live) = &snapshot.stage {
            return live.clone();
        }
    }
    Round::placeholder(1 << (snapshot.round_count - index - 1))
}

fn validate(snapshot: &BracketSnapshot) -> Result<(), BracketError> {
    let round_count = snapshot.round_count;
    if round_count == 0 || round_count >= usize::BITS as usize {
        return Err(BracketError::IncompleteBracketState);
    }
    if snapshot.history.len() > round_count {
        return Err(BracketError::IncompleteBracketState);
    }
    for (index, round) in snapshot.history.iter().enumerate() {
        if round.len() != 1 << (round_count - index - 1) {
            return Err(BracketError::IncompleteBracketState);
        }
    }
    match &snapshot.stage {
        BracketStage::Playing(live) => {
            if snapshot.history.len() == round_count
                || live.len() != 1 << (round_count - snapshot.history.len() - 1)
            {
                return Err(BracketError::IncompleteBracketState);
            }
        }
        BracketStage::Champion(_) => {
            if snapshot.history.len() != round_count {
                return Err(BracketError::IncompleteBracketState);
            }
        }
    }
    Ok(())
}

fn round_x(index: usize) -> u32 {
    index as u32 * (BOX_WIDTH + PADDING_X) + PADDING_X
}

fn grid_top(slot: usize) -> u32 {
    slot as u32 * (BOX_HEIGHT + PADDING_Y) + PADDING_Y
}

fn player_box(snapshot: &BracketSnapshot, player: PlayerId, x: u32, y: u32) -> BoxSpec {
    BoxSpec {
        text: snapshot.name_of(player).to_string(),
        role: BoxRole::Normal,
        x,
        y,
        width: BOX_WIDTH,
        height: BOX_HEIGHT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BracketEngine;

    fn numbered(n: u32) -> BracketEngine {
        BracketEngine::new(
            (1..=n).collect(),
            (1..=n).map(|id| id.to_string()).collect(),
        )
        .expect("Player count should be a power of two")
    }

    fn assert_centers_average(geometry: &BracketGeometry) {
        for index in 1..geometry.rounds.len() {
            for (k, parent) in geometry.rounds[index].iter().enumerate() {
                let child_home = &geometry.rounds[index - 1][2 * k];
                let child_away = &geometry.rounds[index - 1][2 * k + 1];
                assert_eq!(
                    parent.center_y(),
                    (child_home.center_y() + child_away.center_y()) / 2
                );
            }
        }
    }

    #[test]
    fn test_fresh_bracket_spans_full_tree() -> Result<(), BracketError> {
        let geometry = compute(&numbered(8).snapshot())?;

        assert_eq!(geometry.rounds.len(), 4);
        assert_eq!(geometry.rounds[0].len(), 8);
        assert_eq!(geometry.rounds[1].len(), 4);
        assert_eq!(geometry.rounds[2].len(), 2);
        assert_eq!(geometry.rounds[3].len(), 1);

        // 7 matches, two polylines each.
        assert_eq!(geometry.connectors.len(), 14);

        // Unplayed rounds display as empty boxes; round 0 shows the seeding.
        assert_eq!(geometry.rounds[0][0].text, "1");
        assert_eq!(geometry.rounds[1][0].text, "");
        assert_eq!(geometry.rounds[3][0].text, "");
        assert_eq!(geometry.rounds[3][0].role, BoxRole::Champion);

        assert_centers_average(&geometry);
        Ok(())
    }

    #[test]
    fn test_two_player_coordinates() -> Result<(), BracketError> {
        let mut bracket = numbered(2);
        bracket.declare_winner(1).expect("Player should be live");
        let geometry = compute(&bracket.snapshot())?;

        assert_eq!(geometry.width, 260);
        assert_eq!(geometry.height, 160);

        let first = &geometry.rounds[0];
        assert_eq!((first[0].x, first[0].y), (20, 20));
        assert_eq!((first[1].x, first[1].y), (20, 90));

        let champion = &geometry.rounds[1][0];
        assert_eq!((champion.x, champion.y), (140, 55));
        assert_eq!(champion.text, "1");
        assert_eq!(champion.role, BoxRole::Champion);

        assert_eq!(
            geometry.connectors[0].points,
            vec![(120, 45), (130, 45), (130, 115), (120, 115)]
        );
        assert_eq!(geometry.connectors[1].points, vec![(130, 80), (140, 80)]);

        Ok(())
    }

    #[test]
    fn test_mid_tournament_uses_live_round() -> Result<(), BracketError> {
        let mut bracket = numbered(8);
        for player in [1, 3, 5, 7] {
            bracket.declare_winner(player).expect("Player should be live");
        }

        let geometry = compute(&bracket.snapshot())?;
        let texts: Vec<&str> = geometry.rounds[1].iter().map(|b| b.text.as_str()).collect();
        assert_eq!(texts, ["1", "3", "5", "7"]);
        // The semifinal winners are not known yet.
        let texts: Vec<&str> = geometry.rounds[2].iter().map(|b| b.text.as_str()).collect();
        assert_eq!(texts, ["", ""]);

        assert_centers_average(&geometry);
        Ok(())
    }

    #[test]
    fn test_finished_bracket_names_champion() -> Result<(), BracketError> {
        let mut bracket = numbered(4);
        for player in [1, 3, 3] {
            bracket.declare_winner(player).expect("Player should be live");
        }

        let geometry = compute(&bracket.snapshot())?;
        assert_eq!(geometry.rounds[2][0].text, "3");
        assert_centers_average(&geometry);
        Ok(())
    }

    #[test]
    fn test_rejects_inconsistent_snapshot() {
        let mut snapshot = numbered(8).snapshot();
        snapshot.round_count = 2;
        assert_eq!(
            compute(&snapshot),
            Err(BracketError::IncompleteBracketState)
        );

        let mut snapshot = numbered(4).snapshot();
        snapshot.stage = BracketStage::Champion(1);
        assert_eq!(
            compute(&snapshot),
            Err(BracketError::IncompleteBracketState)
        );

        let mut snapshot = numbered(4).snapshot();
        snapshot.history = vec![Round::pairing(&[1, 2, 3, 4])];
        snapshot.stage = BracketStage::Playing(Round::pairing(&[1, 2, 3, 4]));
        assert_eq!(
            compute(&snapshot),
            Err(BracketError::IncompleteBracketState)
        );
    }

    #[test]
    fn test_round_zero_sits_on_the_grid() -> Result<(), BracketError> {
        let geometry = compute(&numbered(16).snapshot())?;
        for (slot, spec) in geometry.rounds[0].iter().enumerate() {
            assert_eq!(spec.x, PADDING_X);
            assert_eq!(spec.y, slot as u32 * (BOX_HEIGHT + PADDING_Y) + PADDING_Y);
        }
        assert_centers_average(&geometry);
        Ok(())
    }
}
