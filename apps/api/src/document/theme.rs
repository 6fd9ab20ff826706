use serde::{Deserialize, Serialize};

/// Sidebar/accent palette of the rendered resume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    GreenYellow,
    BlueOrange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Channels scaled to 0.0..=1.0, as PDF color operators expect.
    pub fn unit(&self) -> (f32, f32, f32) {
        (
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
        )
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
pub const TEXT_DARK: Rgb = Rgb(0x1f, 0x29, 0x37);
pub const TEXT_MUTED: Rgb = Rgb(0x4b, 0x55, 0x63);

impl Theme {
    /// Sidebar and header band.
    pub fn background(&self) -> Rgb {
        match self {
            Theme::GreenYellow => Rgb(0x09, 0x4f, 0x37),
            Theme::BlueOrange => Rgb(0x00, 0x33, 0x66),
        }
    }

    /// Sidebar headings and section rules.
    pub fn accent(&self) -> Rgb {
        match self {
            Theme::GreenYellow => Rgb(0xf6, 0xc0, 0x06),
            Theme::BlueOrange => Rgb(0xff, 0x66, 0x00),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::GreenYellow => "Green & Yellow",
            Theme::BlueOrange => "Blue & Orange",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ThemeQuery {
    #[serde(default)]
    pub theme: Theme,
}
