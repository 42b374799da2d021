// Tours
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! High-level data types.

use derive_getters::Getters;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};
use time::Date;
use tours_core::model::{ModelError, ModelResult};
use tours_core::rest::PathResource;

/// Identifier of a route, assigned by the database on insertion.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct RouteId(i64);

impl RouteId {
    /// Creates a new identifier from its raw database value.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the identifier as its raw database value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl PathResource for RouteId {
    const NOT_FOUND: &'static str = "Route not found";
}

/// All properties of a route except for its identifier.
///
/// This is the data that gets written by insertions and fully replaced by updates.
#[derive(Clone, Constructor, Deserialize, Getters, Serialize)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct RouteData {
    /// Human-readable name of the route.
    name: String,

    /// Free-form description of the route.
    description: String,

    /// Length of the route in days.
    duration: i32,

    /// Price of the route for a single traveler.
    price_per_person: f64,

    /// Reference to the type of this route.
    route_type_id: i64,

    /// Reference to the hotel used by this route, if any.
    hotel_id: Option<i64>,
}

/// A route as stored in the database.
#[derive(Constructor, Deserialize, Getters, Serialize)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Route {
    /// Identifier of the route.
    id: RouteId,

    /// Properties of the route.
    #[serde(flatten)]
    data: RouteData,
}

/// A guide assigned to a route for a period of time.
#[derive(Constructor, Deserialize, Getters, Serialize)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct GuideAssignment {
    /// Identifier of the guide.
    id: i64,

    /// First name of the guide.
    first_name: String,

    /// Last name of the guide.
    last_name: String,

    /// First day in which the guide works on the route.
    start_date: Date,

    /// Last day in which the guide works on the route.
    end_date: Date,
}

/// A scheduled departure of a route.
#[derive(Constructor, Deserialize, Getters, Serialize)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Departure {
    /// Identifier of the departure.
    id: i64,

    /// Day in which the departure starts.
    start_date: Date,

    /// Booking status of the departure.
    status: String,

    /// Price per traveler for this specific departure.
    price_per_person: f64,
}

/// A route along with all of its related entities.
#[derive(Constructor, Deserialize, Getters, Serialize)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct RouteDetails {
    /// The route itself.
    #[serde(flatten)]
    route: Route,

    /// Guides assigned to the route, sorted by last name and first name.
    guides: Vec<GuideAssignment>,

    /// Departures of the route, sorted by start date.
    departures: Vec<Departure>,
}

/// A numeric value received from a client that may be represented as a JSON number or as a string.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug, PartialEq))]
#[serde(untagged)]
pub enum LooseNumber {
    /// An integral JSON number.
    Int(i64),

    /// A non-integral JSON number or one that does not fit in an `i64`.
    Float(f64),

    /// A string that should hold a number.
    Text(String),
}

impl LooseNumber {
    /// Coerces the value into an integer, truncating fractional numbers towards zero.
    ///
    /// `field` is the name of the property holding this value and is used for error reporting.
    fn to_i64(&self, field: &str) -> ModelResult<i64> {
        match self {
            LooseNumber::Int(i) => Ok(*i),
            LooseNumber::Float(f) => {
                let truncated = f.trunc();
                if truncated.is_finite()
                    && truncated >= i64::MIN as f64
                    && truncated < i64::MAX as f64
                {
                    Ok(truncated as i64)
                } else {
                    Err(ModelError(format!("Invalid {}: {} is out of range", field, f)))
                }
            }
            LooseNumber::Text(s) => s.trim().parse::<i64>().map_err(|_| {
                ModelError(format!("Invalid {}: '{}' is not an integer", field, s))
            }),
        }
    }

    /// Coerces the value into a finite floating point number.
    ///
    /// `field` is the name of the property holding this value and is used for error reporting.
    fn to_f64(&self, field: &str) -> ModelResult<f64> {
        let value = match self {
            LooseNumber::Int(i) => *i as f64,
            LooseNumber::Float(f) => *f,
            LooseNumber::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                ModelError(format!("Invalid {}: '{}' is not a number", field, s))
            })?,
        };
        if !value.is_finite() {
            return Err(ModelError(format!("Invalid {}: must be a finite number", field)));
        }
        Ok(value)
    }
}

/// Payload of the requests that create or replace a route.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
pub struct RouteRequest {
    /// Human-readable name of the route.
    name: String,

    /// Free-form description of the route.
    description: String,

    /// Length of the route in days.
    duration: LooseNumber,

    /// Price of the route for a single traveler.
    price_per_person: LooseNumber,

    /// Reference to the type of this route.
    route_type_id: LooseNumber,

    /// Reference to the hotel used by this route, if any.
    #[serde(default)]
    hotel_id: Option<LooseNumber>,
}

impl RouteRequest {
    /// Validates the request and converts it into the properties of a route.
    pub fn into_data(self) -> ModelResult<RouteData> {
        let duration = self.duration.to_i64("duration")?;
        let duration = i32::try_from(duration)
            .map_err(|_| ModelError(format!("Invalid duration: {} is out of range", duration)))?;
        let price_per_person = self.price_per_person.to_f64("price_per_person")?;
        let route_type_id = self.route_type_id.to_i64("route_type_id")?;
        let hotel_id = match self.hotel_id {
            Some(hotel_id) => Some(hotel_id.to_i64("hotel_id")?),
            None => None,
        };

        Ok(RouteData::new(
            self.name,
            self.description,
            duration,
            price_per_person,
            route_type_id,
            hotel_id,
        ))
    }
}
