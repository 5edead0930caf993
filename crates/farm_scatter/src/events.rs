//! Event types and sinks for observing regeneration passes.
//!
//! This module defines [`GenerationEvent`] and a set of sinks to emit, collect or forward
//! events while a [`crate::scene::SceneGenerator`] runs. Particle counts reach the UI
//! through these events.
use crate::distribution::Termination;
use crate::settings::NetShape;

/// Describes events emitted during a regeneration pass.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationEvent {
    /// Emitted when a pass starts.
    RegenerationStarted {
        /// Active building id.
        building: String,
        /// Active floor, 0-indexed.
        floor: usize,
        /// Tank net shape.
        shape: NetShape,
    },

    /// Emitted once the tank particles exist.
    TankGenerated {
        particle_count: usize,
        layers: u32,
        termination: Termination,
        /// Whether particles carry sonar colors.
        sonar: bool,
    },

    /// Emitted once the walls of the active building are resolved.
    RoomsResolved {
        building: String,
        floors: usize,
        segment_count: usize,
    },

    /// Emitted once the active floor is filled with particles.
    BuildingParticlesGenerated {
        floor: usize,
        particle_count: usize,
        termination: Termination,
    },

    /// Emitted after tank and building hotspots are placed.
    HotspotsPlaced {
        tank: usize,
        /// Hotspots across all buildings.
        building: usize,
    },

    /// Emitted when the pass finishes.
    RegenerationFinished {
        tank_particles: usize,
        building_particles: usize,
        wall_segments: usize,
    },

    /// Non-fatal warning generated during a pass.
    Warning {
        /// Context string (e.g. `tank`, `building:scraper`).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`GenerationEvent`], used to filter before building an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationEventKind {
    RegenerationStarted,
    TankGenerated,
    RoomsResolved,
    BuildingParticlesGenerated,
    HotspotsPlaced,
    RegenerationFinished,
    Warning,
}

impl GenerationEvent {
    pub fn kind(&self) -> GenerationEventKind {
        match self {
            GenerationEvent::RegenerationStarted { .. } => GenerationEventKind::RegenerationStarted,
            GenerationEvent::TankGenerated { .. } => GenerationEventKind::TankGenerated,
            GenerationEvent::RoomsResolved { .. } => GenerationEventKind::RoomsResolved,
            GenerationEvent::BuildingParticlesGenerated { .. } => {
                GenerationEventKind::BuildingParticlesGenerated
            }
            GenerationEvent::HotspotsPlaced { .. } => GenerationEventKind::HotspotsPlaced,
            GenerationEvent::RegenerationFinished { .. } => {
                GenerationEventKind::RegenerationFinished
            }
            GenerationEvent::Warning { .. } => GenerationEventKind::Warning,
        }
    }

    pub fn warning(context: impl Into<String>, message: impl Into<String>) -> Self {
        GenerationEvent::Warning {
            context: context.into(),
            message: message.into(),
        }
    }
}

/// Receiver of [`GenerationEvent`]s, e.g. a settings panel showing particle counts.
pub trait EventSink {
    fn send(&mut self, event: GenerationEvent);

    /// Whether events of `kind` should be built and sent at all.
    #[inline]
    fn wants(&self, _kind: GenerationEventKind) -> bool {
        true
    }
}

/// Drops everything.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: GenerationEvent) {}

    #[inline]
    fn wants(&self, _kind: GenerationEventKind) -> bool {
        false
    }
}

/// Forwards events to a closure, optionally only some kinds.
pub struct FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    f: F,
    kinds: Option<Vec<GenerationEventKind>>,
}

impl<F> FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    pub fn new(f: F) -> Self {
        Self { f, kinds: None }
    }

    /// Forwards only events whose kind is in `kinds`.
    pub fn for_kinds(kinds: impl IntoIterator<Item = GenerationEventKind>, f: F) -> Self {
        Self {
            f,
            kinds: Some(kinds.into_iter().collect()),
        }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    #[inline]
    fn send(&mut self, event: GenerationEvent) {
        if self.wants(event.kind()) {
            (self.f)(event);
        }
    }

    fn wants(&self, kind: GenerationEventKind) -> bool {
        self.kinds.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}

/// Keeps every event, in arrival order.
#[derive(Debug, Default)]
pub struct VecSink {
    events: Vec<GenerationEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[GenerationEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events of one kind, in arrival order.
    pub fn of_kind(&self, kind: GenerationEventKind) -> impl Iterator<Item = &GenerationEvent> {
        self.events.iter().filter(move |e| e.kind() == kind)
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: GenerationEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning(ctx: &str) -> GenerationEvent {
        GenerationEvent::warning(ctx, "msg")
    }

    #[test]
    fn vec_sink_collects_events() {
        let mut sink = VecSink::new();
        assert!(sink.is_empty());
        sink.send(warning("a"));
        sink.send(GenerationEvent::HotspotsPlaced {
            tank: 10,
            building: 30,
        });
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.of_kind(GenerationEventKind::Warning).count(), 1);
    }

    #[test]
    fn fn_sink_invokes_callback() {
        let mut count = 0;
        let mut sink = FnSink::new(|_event| {
            count += 1;
        });
        sink.send(warning("a"));
        sink.send(warning("b"));
        assert_eq!(count, 2);
    }

    #[test]
    fn fn_sink_filters_by_kind() {
        let mut seen = Vec::new();
        let mut sink = FnSink::for_kinds([GenerationEventKind::Warning], |e| seen.push(e));
        assert!(sink.wants(GenerationEventKind::Warning));
        assert!(!sink.wants(GenerationEventKind::TankGenerated));
        sink.send(GenerationEvent::HotspotsPlaced {
            tank: 1,
            building: 1,
        });
        sink.send(warning("tank"));
        drop(sink);
        assert_eq!(seen, vec![warning("tank")]);
    }

    #[test]
    fn unit_sink_wants_nothing() {
        assert!(!().wants(GenerationEventKind::TankGenerated));
        assert!(VecSink::new().wants(GenerationEventKind::TankGenerated));
    }

    #[test]
    fn kind_matches_variant() {
        let e = GenerationEvent::BuildingParticlesGenerated {
            floor: 1,
            particle_count: 0,
            termination: Termination::Complete,
        };
        assert_eq!(e.kind(), GenerationEventKind::BuildingParticlesGenerated);
    }
}
