//! The dice roll state machine: face status, orientation, and one phase at a time.

use rand::Rng;

use crate::geometry::{Cube, alignment_angle, target_angles_for_face};
use crate::texture_pool::TexturePool;
use crate::utils::constants::{cube_constants::FACE_COUNT, roll_constants::*};

/// What the cube is doing right now.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum RollPhase {
    #[default]
    // Slow ambient spin until the first command
    IdleRotating,
    // Free spin with damping
    Rotating,
    // X/Y converge to the winner's target angles
    Snapping,
    // Z rolls the winner upright
    Aligning,
    // Nothing left to pick, wiggle and come back to the baseline
    Shaking {
        progress: f64,
        base_x: f64,
        base_y: f64,
    },
    // At rest, waiting for the next command
    Settled,
}

/// Per session roll state, advanced once per tick.
#[derive(Clone, Debug)]
pub struct RollState {
    pub phase: RollPhase,

    // Face status
    pub is_grey: [bool; FACE_COUNT],
    pub is_winner: [bool; FACE_COUNT],

    // Orientation, radians
    pub angle_x: f64,
    pub angle_y: f64,
    pub angle_z: f64,
    // Spin, radians per tick
    pub speed_x: f64,
    pub speed_y: f64,

    // Targets of the in-flight snap / align
    pub target_x: f64,
    pub target_y: f64,
    pub target_z: f64,

    pub winning_face: Option<usize>,
    /// Face chosen by the last completed roll.
    pub last_winner: Option<usize>,
    pub needs_to_retire_face: bool,

    // Jump, in screen pixels
    pub offset_y: f64,
    jump_velocity: f64,
    is_jumping: bool,
}

impl Default for RollState {
    fn default() -> Self {
        Self {
            phase: RollPhase::IdleRotating,
            is_grey: [true; FACE_COUNT],
            is_winner: [false; FACE_COUNT],
            angle_x: 0.0,
            angle_y: 0.0,
            angle_z: 0.0,
            speed_x: IDLE_SPEED_X,
            speed_y: IDLE_SPEED_Y,
            target_x: 0.0,
            target_y: 0.0,
            target_z: 0.0,
            winning_face: None,
            last_winner: None,
            needs_to_retire_face: false,
            offset_y: 0.0,
            jump_velocity: 0.0,
            is_jumping: false,
        }
    }
}

impl RollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Faces that can still win: textured and not yet picked.
    pub fn valid_faces(&self) -> Vec<usize> {
        (0..FACE_COUNT)
            .filter(|&i| !self.is_grey[i] && !self.is_winner[i])
            .collect()
    }

    /// Number of textured faces.
    pub fn active_count(&self) -> usize {
        self.is_grey.iter().filter(|grey| !**grey).count()
    }

    pub fn is_jumping(&self) -> bool {
        self.is_jumping
    }

    /// True while a roll is in flight and new commands are ignored.
    pub fn is_rolling(&self) -> bool {
        matches!(
            self.phase,
            RollPhase::Rotating | RollPhase::Snapping | RollPhase::Aligning
        )
    }

    /// Starts a new roll.
    ///
    /// Picks a winner among the valid faces, recycling retired winners with fresh
    /// textures from `pool` once every face has won. When nothing can be picked the
    /// cube shakes instead.
    pub fn start_rotation<R: Rng + ?Sized>(
        &mut self,
        cube: &mut Cube,
        pool: &mut TexturePool,
        rng: &mut R,
    ) {
        match self.phase {
            RollPhase::IdleRotating => {
                self.phase = RollPhase::Settled;
                self.speed_x = 0.0;
                self.speed_y = 0.0;
            }
            RollPhase::Rotating | RollPhase::Snapping | RollPhase::Aligning => return,
            RollPhase::Shaking { base_x, base_y, .. } => {
                self.angle_x = base_x;
                self.angle_y = base_y;
                self.phase = RollPhase::Settled;
            }
            RollPhase::Settled => {}
        }

        let mut valid = self.valid_faces();

        // Every textured face already won: start a new cycle
        if valid.is_empty() {
            let mut any_active = false;
            for i in 0..FACE_COUNT {
                if self.is_grey[i] {
                    continue;
                }
                any_active = true;
                if self.is_winner[i] {
                    pool.replace_face_texture(i, &mut cube.faces, &mut self.is_grey);
                    if !self.is_grey[i] {
                        self.is_winner[i] = false;
                        valid.push(i);
                    }
                } else {
                    valid.push(i);
                }
            }
            if !any_active {
                log::info!("All faces are grey, no new cycle possible");
            }
        }

        let active = self.active_count();

        if valid.len() == 1 && active <= 2 {
            // Last face of the final round: snap without spinning
            let winner = valid[0];
            self.pick_winner(winner);
            self.angle_z = 0.0;
            self.target_z = 0.0;
            self.phase = RollPhase::Snapping;
        } else if !valid.is_empty() {
            self.angle_z = 0.0;
            self.target_z = 0.0;

            let winner = if valid.len() == 1 {
                valid[0]
            } else {
                valid[rng.random_range(0..valid.len())]
            };
            self.pick_winner(winner);

            self.speed_x = (rng.random::<f64>() - 0.5) * 2.0 * MAX_SPIN_SPEED;
            self.speed_y = (rng.random::<f64>() - 0.5) * 2.0 * MAX_SPIN_SPEED;
            if self.speed_x.abs() < MIN_VISIBLE_SPEED && self.speed_y.abs() < MIN_VISIBLE_SPEED {
                self.speed_x = KICK_SPEED_MIN + rng.random::<f64>() * KICK_SPEED_RANGE;
            }

            self.phase = RollPhase::Rotating;
            self.is_jumping = true;
            self.jump_velocity = JUMP_VELOCITY;
        } else {
            self.phase = RollPhase::Shaking {
                progress: 0.0,
                base_x: self.angle_x,
                base_y: self.angle_y,
            };
        }
    }

    fn pick_winner(&mut self, face: usize) {
        self.winning_face = Some(face);
        self.is_winner[face] = true;
        let (target_x, target_y) = target_angles_for_face(face);
        self.target_x = target_x;
        self.target_y = target_y;
    }

    /// Advances one tick. Returns `true` only on the tick a roll completes.
    pub fn update(&mut self) -> bool {
        if self.is_jumping {
            self.jump_velocity += JUMP_GRAVITY;
            self.offset_y += self.jump_velocity;
            if self.offset_y >= 0.0 {
                self.offset_y = 0.0;
                self.jump_velocity = -self.jump_velocity * JUMP_BOUNCE;
            }
        }

        match self.phase {
            RollPhase::IdleRotating => {
                self.angle_x += self.speed_x;
                self.angle_y += self.speed_y;
            }
            RollPhase::Rotating => {
                if self.needs_to_retire_face {
                    self.last_winner = None;
                    self.needs_to_retire_face = false;
                }

                self.angle_x += self.speed_x;
                self.angle_y += self.speed_y;
                self.speed_x *= SPIN_DAMPING;
                self.speed_y *= SPIN_DAMPING;

                if self.speed_x.abs() < STOP_SPEED && self.speed_y.abs() < STOP_SPEED {
                    self.is_jumping = false;
                    self.offset_y = 0.0;
                    self.jump_velocity = 0.0;
                    self.phase = RollPhase::Snapping;
                }
            }
            RollPhase::Snapping => {
                self.angle_x += (self.target_x - self.angle_x) * SNAP_SMOOTHING;
                self.angle_y += (self.target_y - self.angle_y) * SNAP_SMOOTHING;

                if (self.target_x - self.angle_x).abs() < SNAP_EPSILON
                    && (self.target_y - self.angle_y).abs() < SNAP_EPSILON
                {
                    self.angle_x = self.target_x;
                    self.angle_y = self.target_y;
                    self.target_z = self.winning_face.map_or(0.0, |face| {
                        alignment_angle(face, self.target_x, self.target_y)
                    });
                    self.phase = RollPhase::Aligning;
                }
            }
            RollPhase::Aligning => {
                self.angle_z += (self.target_z - self.angle_z) * SNAP_SMOOTHING;

                if (self.target_z - self.angle_z).abs() < SNAP_EPSILON {
                    self.angle_z = self.target_z;
                    self.last_winner = self.winning_face.take();
                    self.needs_to_retire_face = true;
                    self.phase = RollPhase::Settled;
                    return true;
                }
            }
            RollPhase::Shaking {
                progress,
                base_x,
                base_y,
            } => {
                let progress = progress + SHAKE_SPEED;
                let offset = progress.sin() * SHAKE_MAGNITUDE;
                self.angle_x += offset;
                self.angle_y -= offset;

                if progress >= SHAKE_DURATION {
                    self.angle_x = base_x;
                    self.angle_y = base_y;
                    self.phase = RollPhase::Settled;
                } else {
                    self.phase = RollPhase::Shaking {
                        progress,
                        base_x,
                        base_y,
                    };
                }
            }
            RollPhase::Settled => {}
        }
        false
    }

    /// Forgets the last winner after the pool was reloaded.
    pub fn reset_after_reload(&mut self) {
        self.last_winner = None;
    }
}
