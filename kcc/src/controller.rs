//! Fixed-step kinematic character controller.
//!
//! The owner calls [`CharacterController::update`] once per frame with the velocity it wants
//! and the frame delta. Internally the controller runs whole fixed steps (ground probe, then
//! collide-and-slide) and exposes a position interpolated between the last two steps for
//! rendering.

use crate::{
    collision::{
        CapsuleShape, ControllerSettings, GroundingReport, ShapeSweeper, SlideRequest, Vec3,
        collide_and_slide, probe_distance, probe_ground, velocity::land,
    },
    error::ControllerError,
    fixed_step::FixedStepClock,
};

/// Collects construction parameters; the sweeper is mandatory.
#[derive(Debug)]
pub struct CharacterControllerBuilder<S> {
    capsule: CapsuleShape,
    sweeper: Option<S>,
    settings: ControllerSettings,
    position: Vec3,
}

impl<S: ShapeSweeper> CharacterControllerBuilder<S> {
    pub fn new(capsule: CapsuleShape) -> Self {
        Self {
            capsule,
            sweeper: None,
            settings: ControllerSettings::default(),
            position: Vec3::zeros(),
        }
    }

    pub fn sweeper(mut self, sweeper: S) -> Self {
        self.sweeper = Some(sweeper);
        self
    }

    pub fn settings(mut self, settings: ControllerSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Initial actor position (foot sphere centre).
    pub fn position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn build(self) -> Result<CharacterController<S>, ControllerError> {
        let Some(sweeper) = self.sweeper else {
            log::error!("character controller built without a shape sweeper");
            return Err(ControllerError::MissingSweeper);
        };
        self.settings.validate()?;

        log::debug!(
            "character controller created at {:?} (radius {}, height {})",
            self.position,
            self.capsule.radius(),
            self.capsule.height()
        );

        Ok(CharacterController {
            sweeper,
            capsule: self.capsule,
            settings: self.settings,
            clock: FixedStepClock::new(
                self.settings.fixed_time_step,
                self.settings.max_frame_delta,
            ),
            transient_position: self.position,
            previous_position: self.position,
            interpolated_position: self.position,
            velocity: Vec3::zeros(),
            grounding: GroundingReport::airborne(),
            last_grounding: GroundingReport::airborne(),
        })
    }
}

/// A capsule actor moving through a static world.
///
/// Owns its simulation state exclusively; nothing is shared between controllers except,
/// possibly, the sweeper (`S` may be an `Arc` or a reference).
#[derive(Debug)]
pub struct CharacterController<S> {
    sweeper: S,
    capsule: CapsuleShape,
    settings: ControllerSettings,
    clock: FixedStepClock,

    /// Authoritative position after the most recent fixed step.
    transient_position: Vec3,
    /// Position before the most recent fixed step.
    previous_position: Vec3,
    /// What rendering sees this frame.
    interpolated_position: Vec3,

    velocity: Vec3,
    grounding: GroundingReport,
    last_grounding: GroundingReport,
}

impl<S: ShapeSweeper> CharacterController<S> {
    /// Advance by `frame_delta` seconds of wall time, moving with `desired_velocity`.
    ///
    /// Runs as many fixed steps as the accumulator allows (possibly none) and refreshes the
    /// interpolated position.
    pub fn update(&mut self, desired_velocity: Vec3, frame_delta: f32) {
        self.clock.accumulate(frame_delta);
        while self.clock.consume_step() {
            self.previous_position = self.transient_position;
            self.fixed_step(desired_velocity);
        }

        let alpha = self.clock.alpha();
        self.interpolated_position = self
            .previous_position
            .lerp(&self.transient_position, alpha);
    }

    /// One simulation step of exactly `fixed_time_step` seconds.
    fn fixed_step(&mut self, desired_velocity: Vec3) {
        let settings = &self.settings;
        let was_grounded = self.grounding.is_stable_on_ground;
        self.last_grounding = self.grounding;

        let distance = probe_distance(settings, &self.capsule, was_grounded, false);
        let probe = probe_ground(
            &self.sweeper,
            &self.capsule,
            self.transient_position,
            distance,
            settings,
        );
        let mut position = probe.position;
        let mut grounding = probe.report;

        let mut velocity = desired_velocity;
        if !was_grounded && grounding.is_stable_on_ground {
            log::trace!("landed on {:?}", grounding.ground_normal);
            velocity = land(velocity, &grounding.ground_normal);
        }

        let slide = collide_and_slide(
            &self.sweeper,
            &self.capsule,
            &grounding,
            settings,
            SlideRequest {
                start_pos: position,
                velocity,
                dt: settings.fixed_time_step,
            },
        );
        position = slide.end_pos;

        // Walking off a ledge onto lower walkable ground within one step.
        if slide.found_ground && !grounding.is_stable_on_ground {
            log::trace!("slide touched ground while airborne; re-probing");
            let distance = probe_distance(settings, &self.capsule, was_grounded, true);
            let reprobe = probe_ground(&self.sweeper, &self.capsule, position, distance, settings);
            position = reprobe.position;
            grounding = reprobe.report;
        }

        self.transient_position = position;
        self.velocity = slide.velocity;
        self.grounding = grounding;
    }

    /// Authoritative simulated position (not interpolated).
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.transient_position
    }

    /// Teleport. Suppresses interpolation until the next step and keeps any partial step.
    pub fn set_position(&mut self, position: Vec3) {
        log::debug!("teleport {:?} -> {:?}", self.transient_position, position);
        self.transient_position = position;
        self.previous_position = position;
        self.interpolated_position = position;
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.grounding.is_stable_on_ground
    }

    /// Position for rendering this frame.
    #[inline]
    pub fn interpolated_position(&self) -> Vec3 {
        self.interpolated_position
    }

    #[inline]
    pub fn previous_position(&self) -> Vec3 {
        self.previous_position
    }

    #[inline]
    pub fn interpolation_alpha(&self) -> f32 {
        self.clock.alpha()
    }

    /// Ground report of the most recent step.
    #[inline]
    pub fn grounding(&self) -> &GroundingReport {
        &self.grounding
    }

    /// Ground report from the step before the most recent one.
    #[inline]
    pub fn last_grounding(&self) -> &GroundingReport {
        &self.last_grounding
    }

    /// Velocity the actor actually moved with at the end of the most recent step.
    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    #[inline]
    pub fn capsule(&self) -> &CapsuleShape {
        &self.capsule
    }

    #[inline]
    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    #[inline]
    pub fn sweeper(&self) -> &S {
        &self.sweeper
    }
}
