use image::Rgba;

/// A single color component of an RGBA pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Red,
    Green,
    Blue,
}

impl Component {
    /// All components in pixel order.
    pub const RGB: [Component; 3] = [Component::Red, Component::Green, Component::Blue];

    /// Position of this component in an RGBA pixel.
    pub fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }

    /// Read this component from `px`.
    pub fn of(self, px: Rgba<u8>) -> u8 {
        px.0[self.index()]
    }

    /// Display color used when plotting this component.
    pub fn plot_color(self) -> Rgba<u8> {
        match self {
            Self::Red => Rgba([230, 41, 55, 255]),
            Self::Green => Rgba([0, 228, 48, 255]),
            Self::Blue => Rgba([0, 121, 241, 255]),
        }
    }

    /// Isolate this component into an opaque pixel (other components zeroed).
    pub fn isolate(self, px: Rgba<u8>) -> Rgba<u8> {
        let mut out = Rgba([0, 0, 0, 255]);
        out.0[self.index()] = self.of(px);
        out
    }
}

/// Which view of the source image the analyzer shows and plots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    #[default]
    Red,
    Green,
    Blue,
    Original,
}

impl Channel {
    /// Components plotted for this channel: one for a single channel, all three for `Original`.
    pub fn components(self) -> &'static [Component] {
        match self {
            Self::Red => &[Component::Red],
            Self::Green => &[Component::Green],
            Self::Blue => &[Component::Blue],
            Self::Original => &Component::RGB,
        }
    }

    /// Text on the selector button.
    pub fn label(self) -> &'static str {
        match self {
            Self::Red => "R",
            Self::Green => "G",
            Self::Blue => "B",
            Self::Original => "Orig",
        }
    }

    /// Button fill when this channel is selected.
    pub fn active_color(self) -> Rgba<u8> {
        match self {
            Self::Red => Rgba([190, 33, 55, 255]),
            Self::Green => Rgba([0, 117, 44, 255]),
            Self::Blue => Rgba([0, 82, 172, 255]),
            Self::Original => Rgba([200, 122, 255, 255]),
        }
    }
}
