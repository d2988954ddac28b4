//! Minimal grid pursuit game.
//!
//! A walled ASCII layout with one pursuer and any number of targets. The
//! pursuer captures a target by sharing its cell. Targets either stay put
//! or random-walk one cell per tick.
//!
//! ```text
//! %%%%%%%%%%
//! %P   %  G%
//! % %% % % %
//! %      G %
//! %%%%%%%%%%
//! ```
//!
//! The first text line is the top of the map (highest `y`).

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    Result,
    error::Error,
    ports::Engine,
    types::{Action, Move, Observation, Position, Target},
};

/// Layout used by the `train` command when none is supplied.
pub const DEFAULT_LAYOUT: &str = "\
%%%%%%%%%%%%%%%%%%%%
%P    %       %    %
% %%% % %%%%% % %% %
% %       G     %  %
% % %%%%% %%% %%% %%
%      %     %    G%
%%%% % % %%% % %%% %
%    %     G       %
%%%%%%%%%%%%%%%%%%%%";

/// Parsed map: walls plus starting positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    width: u32,
    height: u32,
    walls: Vec<bool>,
    pursuer: Position,
    targets: Vec<Position>,
}

impl Layout {
    /// Parse an ASCII layout.
    ///
    /// `%` is a wall, `P` the pursuer, `G` a target, and `.`, `o` or space
    /// open floor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLayout`] for ragged or empty maps, unknown
    /// characters, a missing or repeated pursuer, or no targets.
    pub fn parse(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .collect();
        let invalid = |message: String| Error::InvalidLayout { message };

        let height = lines.len();
        let width = lines.first().map_or(0, |line| line.chars().count());
        if width == 0 {
            return Err(invalid("layout is empty".to_string()));
        }

        let mut walls = vec![false; width * height];
        let mut pursuer = None;
        let mut targets = Vec::new();

        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != width {
                return Err(invalid(format!(
                    "line {} has {} cells, expected {width}",
                    row + 1,
                    line.chars().count()
                )));
            }
            let y = (height - 1 - row) as i32;
            for (x, cell) in line.chars().enumerate() {
                let position = Position::new(x as i32, y);
                match cell {
                    '%' => walls[(y as usize) * width + x] = true,
                    'P' if pursuer.is_some() => {
                        return Err(invalid(format!("second pursuer at {position}")));
                    }
                    'P' => pursuer = Some(position),
                    'G' => targets.push(position),
                    '.' | 'o' | ' ' => {}
                    other => {
                        return Err(invalid(format!("unknown cell '{other}' at {position}")));
                    }
                }
            }
        }

        let pursuer = pursuer.ok_or_else(|| invalid("no pursuer 'P'".to_string()))?;
        if targets.is_empty() {
            return Err(invalid("no targets 'G'".to_string()));
        }

        Ok(Self {
            width: width as u32,
            height: height as u32,
            walls,
            pursuer,
            targets,
        })
    }

    /// Map width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Map height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Starting cell of the pursuer.
    pub fn pursuer_start(&self) -> Position {
        self.pursuer
    }

    /// Starting cells of the targets, in engine order.
    pub fn target_starts(&self) -> &[Position] {
        &self.targets
    }

    fn index(&self, position: Position) -> Option<usize> {
        let in_bounds = (0..self.width as i32).contains(&position.x)
            && (0..self.height as i32).contains(&position.y);
        in_bounds.then(|| position.y as usize * self.width as usize + position.x as usize)
    }

    /// Whether `position` is walkable; out-of-bounds cells are not.
    pub fn is_open(&self, position: Position) -> bool {
        self.index(position).is_some_and(|i| !self.walls[i])
    }

    /// Walkable cells in row-major order from the bottom row.
    pub fn open_cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Position::new(x, y)))
            .filter(|&p| self.is_open(p))
    }

    /// Legal moves from `position`: `Stop` plus every open neighbour.
    pub fn legal_moves(&self, position: Position) -> Vec<Move> {
        Move::ALL
            .into_iter()
            .filter(|&mv| mv == Move::Stop || self.is_open(position.step(mv)))
            .collect()
    }
}

/// How targets move between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetMotion {
    #[default]
    Stationary,
    RandomWalk,
}

/// Engine over a [`Layout`].
#[derive(Debug, Clone)]
pub struct GridArena {
    layout: Layout,
    pursuer: Position,
    targets: Vec<Target>,
    motion: TargetMotion,
    rng: StdRng,
    ticks: usize,
}

impl GridArena {
    /// Start a game on `layout`; `seed` drives target motion.
    pub fn new(layout: Layout, motion: TargetMotion, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let targets = layout
            .target_starts()
            .iter()
            .map(|&p| Target::new(p, true))
            .collect();
        Self {
            pursuer: layout.pursuer_start(),
            layout,
            targets,
            motion,
            rng,
            ticks: 0,
        }
    }

    /// The map being played.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Moves accepted so far.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Number of targets captured so far.
    pub fn captured(&self) -> usize {
        self.targets.iter().filter(|t| !t.alive).count()
    }

    fn capture_at_pursuer(&mut self) {
        let pursuer = self.pursuer;
        for target in self.targets.iter_mut().filter(|t| t.alive) {
            if target.position == pursuer {
                target.alive = false;
            }
        }
    }

    fn move_targets(&mut self) {
        if self.motion == TargetMotion::Stationary {
            return;
        }
        for i in 0..self.targets.len() {
            if !self.targets[i].alive {
                continue;
            }
            let from = self.targets[i].position;
            let moves = self.layout.legal_moves(from);
            let open: Vec<Move> = moves.into_iter().filter(|&mv| mv != Move::Stop).collect();
            // Dead ends still allow staying put.
            if let Some(&mv) = open.choose(&mut self.rng) {
                if self.rng.random_bool(0.8) {
                    self.targets[i].position = from.step(mv);
                }
            }
        }
    }
}

impl Engine for GridArena {
    fn observe(&self) -> Observation {
        Observation {
            self_position: self.pursuer,
            targets: self.targets.clone(),
            legal_moves: self.layout.legal_moves(self.pursuer),
            width: self.layout.width(),
            height: self.layout.height(),
        }
    }

    fn submit(&mut self, mv: Move) -> Result<()> {
        let next = self.pursuer.step(mv);
        if !self.layout.is_open(next) {
            if let Some(action) = Action::from_move(mv) {
                return Err(Error::IllegalAction { action });
            }
        }

        self.pursuer = next;
        self.capture_at_pursuer();
        self.move_targets();
        self.capture_at_pursuer();
        self.ticks += 1;
        Ok(())
    }

    fn is_over(&self) -> bool {
        self.targets.iter().all(|t| !t.alive)
    }
}
