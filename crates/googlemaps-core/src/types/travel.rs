//! Routing options shared by the directions and distance matrix services.

/// Declares a fieldless enum whose variants map to fixed wire strings.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant, )+
        }

        impl $name {
            /// Every supported value
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The value as sent on the wire
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $wire, )+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::MapsError;

            fn from_str(s: &str) -> crate::Result<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|value| value.as_str() == s)
                    .ok_or_else(|| {
                        crate::MapsError::invalid(format!(
                            "invalid {} value: {s}",
                            stringify!($name)
                        ))
                    })
            }
        }
    };
}

pub(crate) use wire_enum;

wire_enum! {
    /// Mode of transport used to calculate routes
    pub enum TravelMode {
        /// Road network driving directions (default)
        Driving => "driving",
        /// Pedestrian paths and sidewalks
        Walking => "walking",
        /// Bicycle paths and preferred streets
        Bicycling => "bicycling",
        /// Public transit routes
        Transit => "transit",
    }
}

wire_enum! {
    /// Features a route should avoid
    pub enum Avoid {
        /// Toll roads and bridges
        Tolls => "tolls",
        /// Highways
        Highways => "highways",
        /// Ferries
        Ferries => "ferries",
        /// Indoor steps for walking and transit
        Indoor => "indoor",
    }
}

wire_enum! {
    /// Preferred public transit vehicle
    pub enum TransitMode {
        /// Bus
        Bus => "bus",
        /// Subway
        Subway => "subway",
        /// Train
        Train => "train",
        /// Tram and light rail
        Tram => "tram",
        /// Shorthand for train, tram and subway
        Rail => "rail",
    }
}

wire_enum! {
    /// Transit route preference
    pub enum TransitRoutingPreference {
        /// Limit the amount of walking
        LessWalking => "less_walking",
        /// Limit the number of transfers
        FewerTransfers => "fewer_transfers",
    }
}

wire_enum! {
    /// Predictive model used to estimate time in traffic
    pub enum TrafficModel {
        /// Best estimate from historical and live traffic
        BestGuess => "best_guess",
        /// Longer than the actual travel time on most days
        Pessimistic => "pessimistic",
        /// Shorter than the actual travel time on most days
        Optimistic => "optimistic",
    }
}

wire_enum! {
    /// Unit system for displayed distances
    pub enum Units {
        /// Kilometers and meters
        Metric => "metric",
        /// Miles and feet
        Imperial => "imperial",
    }
}
