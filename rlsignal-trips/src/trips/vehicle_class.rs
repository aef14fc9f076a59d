use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// vehicle categories written as `<vType>` declarations in the route document.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum VehicleClass {
    Emergency,
    Default,
}

impl VehicleClass {
    /// declaration order in the route document.
    pub const ALL: [VehicleClass; 2] = [VehicleClass::Emergency, VehicleClass::Default];

    /// the `id` of the `<vType>` and the `type` attribute of each `<trip>`.
    pub fn type_id(&self) -> &'static str {
        match self {
            VehicleClass::Emergency => "emergency",
            VehicleClass::Default => "default",
        }
    }

    /// SUMO abstract vehicle class. both types use "container" so the
    /// simulator applies identical permissions to them.
    pub fn v_class(&self) -> &'static str {
        "container"
    }

    pub fn gui_shape(&self) -> &'static str {
        match self {
            VehicleClass::Emergency => "passenger/van",
            VehicleClass::Default => "passenger/sedan",
        }
    }

    /// RGB color as a comma-delimited triple in [0, 1].
    pub fn color(&self) -> &'static str {
        match self {
            VehicleClass::Emergency => "1,0,0",
            VehicleClass::Default => "0,1,0",
        }
    }
}

impl Display for VehicleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_id())
    }
}
