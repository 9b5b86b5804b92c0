use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// Disease and health labels predicted by the multimodal cucumber model.
///
/// Declaration order is the index order of the model's output channels.
/// The model artifact was trained against exactly this order, so variants
/// must never be reordered, inserted or removed without shipping a new model.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
pub enum DiseaseClass {
    #[strum(serialize = "Anthracnose")]
    #[serde(rename = "Anthracnose")]
    Anthracnose,
    #[strum(serialize = "Bacterial Wilt")]
    #[serde(rename = "Bacterial Wilt")]
    BacterialWilt,
    #[strum(serialize = "Belly Rot")]
    #[serde(rename = "Belly Rot")]
    BellyRot,
    #[strum(serialize = "Downy Mildew")]
    #[serde(rename = "Downy Mildew")]
    DownyMildew,
    #[strum(serialize = "Fresh Cucumber")]
    #[serde(rename = "Fresh Cucumber")]
    FreshCucumber,
    #[strum(serialize = "Fresh Leaf")]
    #[serde(rename = "Fresh Leaf")]
    FreshLeaf,
    #[strum(serialize = "Gummy Stem Blight")]
    #[serde(rename = "Gummy Stem Blight")]
    GummyStemBlight,
    #[strum(serialize = "Pythium Fruit Rot")]
    #[serde(rename = "Pythium Fruit Rot")]
    PythiumFruitRot,
}

/// Number of output channels of the model.
pub const NUM_CLASSES: usize = <DiseaseClass as strum::EnumCount>::COUNT;

impl DiseaseClass {
    /// Every class, indexed the way the model's output vector is.
    pub const ALL: [DiseaseClass; NUM_CLASSES] = [
        DiseaseClass::Anthracnose,
        DiseaseClass::BacterialWilt,
        DiseaseClass::BellyRot,
        DiseaseClass::DownyMildew,
        DiseaseClass::FreshCucumber,
        DiseaseClass::FreshLeaf,
        DiseaseClass::GummyStemBlight,
        DiseaseClass::PythiumFruitRot,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human readable label, identical to the line in the labels artifact.
    pub fn label(self) -> &'static str {
        self.into()
    }

    pub fn is_healthy(self) -> bool {
        matches!(self, DiseaseClass::FreshCucumber | DiseaseClass::FreshLeaf)
    }

    /// Canned treatment advice shown under a classification.
    pub fn recommendation(self) -> &'static str {
        match self {
            DiseaseClass::Anthracnose => {
                "Recommendation: treat with fungicides and reduce humidity."
            }
            DiseaseClass::BacterialWilt => {
                "Recommendation: remove affected plants and improve drainage."
            }
            DiseaseClass::BellyRot => {
                "Recommendation: keep fruit off the soil and apply an antifungal treatment."
            }
            DiseaseClass::DownyMildew => {
                "Recommendation: reduce humidity and improve ventilation."
            }
            DiseaseClass::GummyStemBlight => {
                "Recommendation: treat with fungicides and remove affected parts."
            }
            DiseaseClass::PythiumFruitRot => {
                "Recommendation: improve drainage and treat the soil."
            }
            DiseaseClass::FreshCucumber | DiseaseClass::FreshLeaf => {
                "The plant is healthy! Keep caring for it as usual."
            }
        }
    }
}
