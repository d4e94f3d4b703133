//! Drawing and interaction layers

/// Priority bands of the scene, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    /// Wallpapers
    Background,
    /// Panels below windows
    Bottom,
    /// Regular windows
    Workspace,
    /// Panels above windows
    Top,
    /// Override-redirect surfaces
    Unmanaged,
    /// Lock screen
    Lock,
    /// Desktop widgets
    DesktopWidget,
    /// Minimized windows
    Minimized,
}

impl Layer {
    /// Number of layers
    pub const COUNT: usize = 8;

    /// All layers, lowest first
    pub const ALL: [Layer; Layer::COUNT] = [
        Layer::Background,
        Layer::Bottom,
        Layer::Workspace,
        Layer::Top,
        Layer::Unmanaged,
        Layer::Lock,
        Layer::DesktopWidget,
        Layer::Minimized,
    ];

    /// Position in [`Layer::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Name used when reporting the layer to clients
    pub fn name(self) -> &'static str {
        match self {
            Layer::Background => "background",
            Layer::Bottom => "bottom",
            Layer::Workspace => "workspace",
            Layer::Top => "top",
            Layer::Unmanaged => "unmanaged",
            Layer::Lock => "lock",
            Layer::DesktopWidget => "dew",
            Layer::Minimized => "minimized",
        }
    }
}
