// Carousel module - testimonial slide carousel
//
// The controller knows nothing about terminals or clocks. It talks to the
// outside world through two ports:
// - SlideSurface: where the track offset and indicator states go
// - TimerDriver: how the lock cooldown, autoplay and resume delay are scheduled
//
// CarouselRuntime wires the controller to tokio timers and a single
// stimulus queue; the shells (TUI or headless) supply the surface.

pub mod controller;
pub mod ports;
pub mod runtime;
pub mod stimulus;
pub mod surfaces;
pub mod timers;

pub use controller::CarouselSettings;
pub use runtime::CarouselRuntime;
pub use stimulus::Stimulus;
pub use surfaces::{ChannelSurface, LogSurface, SurfaceUpdate};
