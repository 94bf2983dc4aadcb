//! Closed color sets accepted by the server.
//!
//! Label and list colors come from [`Color`]; a board's theme color comes from
//! [`BoardColor`]. Both reject names outside their set, on the wire and in
//! [`FromStr`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use wekan_core::WekanError;

macro_rules! color_set {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = WekanError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|color| color.as_str() == s)
                    .ok_or_else(|| {
                        WekanError::Validation(format!(
                            "'{}' is not a valid {}",
                            s,
                            stringify!($name)
                        ))
                    })
            }
        }
    };
}

color_set! {
    /// Label and list colors.
    Color {
        White => "white",
        Green => "green",
        Yellow => "yellow",
        Orange => "orange",
        Red => "red",
        Purple => "purple",
        Blue => "blue",
        Sky => "sky",
        Lime => "lime",
        Pink => "pink",
        Black => "black",
        Silver => "silver",
        PeachPuff => "peachpuff",
        Crimson => "crimson",
        Plum => "plum",
        DarkGreen => "darkgreen",
        SlateBlue => "slateblue",
        Magenta => "magenta",
        Gold => "gold",
        Navy => "navy",
        Gray => "gray",
        SaddleBrown => "saddlebrown",
        PaleTurquoise => "paleturquoise",
        MistyRose => "mistyrose",
        Indigo => "indigo",
    }
}

color_set! {
    /// Board theme colors.
    BoardColor {
        Belize => "belize",
        Nephritis => "nephritis",
        Pomegranate => "pomegranate",
        Pumpkin => "pumpkin",
        Wisteria => "wisteria",
        ModeratePink => "moderatepink",
        StrongCyan => "strongcyan",
        LimeGreen => "limegreen",
        Midnight => "midnight",
        Dark => "dark",
        Relax => "relax",
        Corteza => "corteza",
        ClearBlue => "clearblue",
        Natural => "natural",
        Modern => "modern",
        ModernDark => "moderndark",
    }
}
