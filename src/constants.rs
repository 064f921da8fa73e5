// Web frontend tuning constants: element ids, interaction sensitivities, colors.

// Page elements
pub const CONTAINER_ID: &str = "container";
pub const CANVAS_ID: &str = "canvas";
pub const FORM_ID: &str = "alignment-position-form";
pub const RESET_VIEW_ID: &str = "reset-zoom";
pub const FALLBACK_NOTICE_ID: &str = "webgpu-unavailable";

// Radio/checkbox controls
pub const SUB_LR_ID: &str = "subConfigCheckbox";
pub const REFERENCE_FROM_BELOW_ID: &str = "xoff";
pub const SEATED_ID: &str = "seated-radio";
pub const STANDING_ID: &str = "standing-radio";
pub const METERS_ID: &str = "meters-radio";
pub const FEET_ID: &str = "feet-radio";

// Orbit controls (radians per canvas pixel, view heights per pixel)
pub const ORBIT_RADIANS_PER_PX: f32 = 0.005;
pub const PAN_HEIGHTS_PER_PX: f32 = 1.0 / 800.0;

// Wheel zoom: scale factor per 100 units of wheel delta
pub const DOLLY_STEP: f32 = 0.95;
pub const WHEEL_UNIT: f32 = 100.0;

// Axis helper length (world units)
pub const AXES_LENGTH: f32 = 500.0;
pub const AXIS_COLORS: [[f32; 4]; 3] = [
    [1.0, 0.0, 0.0, 1.0], // x
    [0.0, 1.0, 0.0, 1.0], // y
    [0.0, 0.0, 1.0, 1.0], // z
];

// Upper bound on frame delta fed to the camera transition (seconds)
pub const MAX_FRAME_DT: f32 = 0.1;

// Background
pub const CLEAR_COLOR: [f64; 3] = [0.0, 0.0, 0.0];
