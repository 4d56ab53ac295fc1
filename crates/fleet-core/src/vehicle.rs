//! Vehicle type enum shared by fleet synthesis, movement, and routing.
//!
//! Each vehicle type carries one fixed speed constant.  Movement converts it
//! into a per-tick step; route generation converts it into an estimated
//! duration.

/// The kind of vehicle a courier drives.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleType {
    /// Delivery car or van.
    #[default]
    Car,
    /// Motorbike or scooter.
    Bike,
    /// Pedal bicycle.
    Bicycle,
}

impl VehicleType {
    /// All vehicle types, in the order fleet synthesis cycles through them.
    pub const ALL: [VehicleType; 3] = [VehicleType::Car, VehicleType::Bike, VehicleType::Bicycle];

    /// Fixed cruising speed in km/h.
    pub fn speed_kmh(self) -> f64 {
        match self {
            VehicleType::Car     => 40.0,
            VehicleType::Bike    => 30.0,
            VehicleType::Bicycle => 15.0,
        }
    }

    /// Fixed cruising speed in metres per second.
    #[inline]
    pub fn speed_mps(self) -> f64 {
        self.speed_kmh() / 3.6
    }

    /// Human-readable label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleType::Car     => "car",
            VehicleType::Bike    => "bike",
            VehicleType::Bicycle => "bicycle",
        }
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
