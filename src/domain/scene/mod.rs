// Scene registry - Static table of ambient scene profiles

use std::fmt;
use std::str::FromStr;

use crate::error::{AmbimuxError, AmbimuxResult};

/// Placeholder substituted with the target duration in every filter template
pub const DURATION_PLACEHOLDER: &str = "{duration}";

/// Closed set of ambient scene identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    Forest,
    City,
    Cafe,
    Space,
    Lab,
    Garage,
    Vinyl,
}

/// Immutable scene profile: a description plus a lavfi filter-graph template
#[derive(Debug, PartialEq, Eq)]
pub struct SceneProfile {
    pub id: SceneId,
    pub description: &'static str,
    pub filter_template: &'static str,
}

// Each template is a lavfi source graph whose single sink is labelled out0.
// All generators run at 44.1 kHz mono so amix needs no resampling.
static PROFILES: [SceneProfile; 7] = [
    SceneProfile {
        id: SceneId::Forest,
        description: "Rustling leaves, low wind and distant birdsong",
        filter_template: "anoisesrc=c=pink:r=44100:a=0.5:d={duration},bandpass=f=900:width_type=h:w=1400,volume=0.6[leaves];\
anoisesrc=c=brown:r=44100:a=0.4:d={duration},lowpass=f=300[wind];\
sine=f=2800:r=44100:d={duration},tremolo=f=7:d=0.9,volume=0.04[birds];\
[leaves][wind][birds]amix=inputs=3:duration=first[out0]",
    },
    SceneProfile {
        id: SceneId::City,
        description: "Traffic rumble, crowd murmur and engine hum",
        filter_template: "anoisesrc=c=brown:r=44100:a=0.6:d={duration},lowpass=f=250[traffic];\
anoisesrc=c=pink:r=44100:a=0.4:d={duration},bandpass=f=1200:width_type=h:w=2000,volume=0.3[crowd];\
sine=f=110:r=44100:d={duration},tremolo=f=0.5:d=0.5,volume=0.03[engine];\
[traffic][crowd][engine]amix=inputs=3:duration=first[out0]",
    },
    SceneProfile {
        id: SceneId::Cafe,
        description: "Murmured chatter, clinking cups and room tone",
        filter_template: "anoisesrc=c=pink:r=44100:a=0.5:d={duration},bandpass=f=1000:width_type=h:w=1500,tremolo=f=3:d=0.4[chatter];\
anoisesrc=c=white:r=44100:a=0.2:d={duration},highpass=f=5000,volume=0.05[clinks];\
anoisesrc=c=brown:r=44100:a=0.4:d={duration},lowpass=f=200,volume=0.3[room];\
[chatter][clinks][room]amix=inputs=3:duration=first[out0]",
    },
    SceneProfile {
        id: SceneId::Space,
        description: "Deep drone with slow pulsing low tones",
        filter_template: "anoisesrc=c=brown:r=44100:a=0.6:d={duration},lowpass=f=150[drone];\
sine=f=55:r=44100:d={duration},tremolo=f=0.2:d=0.6,volume=0.2[pulse];\
sine=f=82.5:r=44100:d={duration},volume=0.1[fifth];\
[drone][pulse][fifth]amix=inputs=3:duration=first[out0]",
    },
    SceneProfile {
        id: SceneId::Lab,
        description: "Mains hum, equipment harmonics and fan noise",
        filter_template: "sine=f=60:r=44100:d={duration},volume=0.1[hum];\
sine=f=120:r=44100:d={duration},volume=0.05[harmonic];\
anoisesrc=c=white:r=44100:a=0.3:d={duration},highpass=f=4000,lowpass=f=9000,volume=0.08[fans];\
[hum][harmonic][fans]amix=inputs=3:duration=first[out0]",
    },
    SceneProfile {
        id: SceneId::Garage,
        description: "Reverberant low rumble with an idling motor tone",
        filter_template: "anoisesrc=c=brown:r=44100:a=0.5:d={duration},lowpass=f=300[rumble];\
anoisesrc=c=pink:r=44100:a=0.4:d={duration},bandpass=f=400:width_type=h:w=600,volume=0.4[room];\
sine=f=50:r=44100:d={duration},volume=0.08[motor];\
[rumble][room][motor]amix=inputs=3:duration=first[out0]",
    },
    SceneProfile {
        id: SceneId::Vinyl,
        description: "Record hiss, surface crackle and turntable rumble",
        filter_template: "anoisesrc=c=pink:r=44100:a=0.3:d={duration},lowpass=f=3000,volume=0.15[hiss];\
anoisesrc=c=white:r=44100:a=0.3:d={duration},highpass=f=2000,tremolo=f=13:d=1,volume=0.1[crackle];\
anoisesrc=c=brown:r=44100:a=0.4:d={duration},lowpass=f=120,volume=0.3[rumble];\
[hiss][crackle][rumble]amix=inputs=3:duration=first[out0]",
    },
];

impl SceneId {
    /// Every scene in registry order
    pub fn all() -> [SceneId; 7] {
        [
            SceneId::Forest,
            SceneId::City,
            SceneId::Cafe,
            SceneId::Space,
            SceneId::Lab,
            SceneId::Garage,
            SceneId::Vinyl,
        ]
    }

    /// Canonical lowercase token
    pub fn as_str(&self) -> &'static str {
        match self {
            SceneId::Forest => "forest",
            SceneId::City => "city",
            SceneId::Cafe => "cafe",
            SceneId::Space => "space",
            SceneId::Lab => "lab",
            SceneId::Garage => "garage",
            SceneId::Vinyl => "vinyl",
        }
    }

    /// Profile for this scene
    pub fn profile(&self) -> &'static SceneProfile {
        &PROFILES[*self as usize]
    }

    fn valid_tokens() -> String {
        Self::all()
            .iter()
            .map(SceneId::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SceneId {
    type Err = AmbimuxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        SceneId::all()
            .into_iter()
            .find(|id| id.as_str() == token)
            .ok_or_else(|| AmbimuxError::UnknownScene {
                scene: s.to_string(),
                valid: SceneId::valid_tokens(),
            })
    }
}

/// Look up the profile for a scene identifier
pub fn lookup(identifier: &str) -> AmbimuxResult<&'static SceneProfile> {
    identifier.parse::<SceneId>().map(|id| id.profile())
}

/// All registered profiles
pub fn profiles() -> &'static [SceneProfile] {
    &PROFILES
}
