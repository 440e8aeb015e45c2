use anyhow::Result;
use clap::{Parser, Subcommand};
use park_core::{CheckInRequest, Difficulty, GeoPoint, OccupancyLevel};
use park_sdk::{ParkClient, WeatherUpdate};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Park server URL
    #[arg(long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List facilities, or the nearest ones to a point
    Facilities {
        #[arg(long = "type")]
        facility_type: Option<String>,
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List trails
    Trails {
        #[arg(long)]
        difficulty: Option<Difficulty>,
    },
    /// List amenities, or the nearest ones to a point
    Amenities {
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show occupancy for one facility or all of them
    Occupancy { facility_id: Option<i64> },
    /// Show today's recommendations
    Recommend,
    /// Show the latest weather, or record a new observation
    Weather {
        #[arg(long, requires = "condition", allow_hyphen_values = true)]
        record_temp: Option<f64>,
        #[arg(long)]
        condition: Option<String>,
        #[arg(long)]
        wind_kph: Option<f64>,
        /// Mark the recorded observation unsuitable for outdoor activity
        #[arg(long)]
        unsuitable: bool,
    },
    /// Check in at a facility or trail
    CheckIn {
        #[arg(long)]
        user: String,
        #[arg(long)]
        activity: String,
        #[arg(long, default_value_t = 1)]
        party_size: i64,
        #[arg(long, conflicts_with = "trail")]
        facility: Option<i64>,
        #[arg(long)]
        trail: Option<i64>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },
    /// Close an open check-in
    Checkout { checkin_id: i64 },
    /// Show a user's recent check-ins
    History { user: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let client = ParkClient::new(args.url);

    match args.command {
        Command::Facilities {
            facility_type,
            lat: Some(lat),
            lon: Some(lon),
            limit,
        } => {
            let nearby = client
                .facilities_near(lat, lon, limit, facility_type.as_deref())
                .await?;
            for entry in nearby {
                println!(
                    "{:>4}  {:<28} {:<18} {:.2} km",
                    entry.item.facility_id, entry.item.name, entry.item.facility_type, entry.distance_km
                );
            }
        }
        Command::Facilities { facility_type, .. } => {
            for facility in client.facilities(facility_type.as_deref()).await? {
                println!(
                    "{:>4}  {:<28} {:<18} cap {}",
                    facility.facility_id, facility.name, facility.facility_type, facility.capacity
                );
            }
        }
        Command::Trails { difficulty } => {
            for trail in client.trails(difficulty).await? {
                println!(
                    "{:>4}  {:<24} {:<9} {:.1} km",
                    trail.trail_id, trail.name, trail.difficulty_level, trail.distance_km
                );
            }
        }
        Command::Amenities {
            lat: Some(lat),
            lon: Some(lon),
            limit,
        } => {
            for entry in client.amenities_near(lat, lon, limit).await? {
                println!(
                    "{:<24} {:<16} {:.2} km",
                    entry.item.name, entry.item.amenity_type, entry.distance_km
                );
            }
        }
        Command::Amenities { .. } => {
            for amenity in client.amenities().await? {
                println!(
                    "{:<24} {:<16} {}",
                    amenity.name,
                    amenity.amenity_type,
                    amenity.operating_hours.as_deref().unwrap_or("-")
                );
            }
        }
        Command::Occupancy { facility_id } => {
            let snapshots = match facility_id {
                Some(id) => vec![client.facility_occupancy(id).await?],
                None => client.occupancy().await?,
            };
            for s in snapshots {
                println!(
                    "{:>4}  {:>3}/{:<3} {:>3}%  {}",
                    s.facility_id,
                    s.current,
                    s.capacity,
                    s.percentage,
                    level_label(s.level)
                );
            }
        }
        Command::Recommend => {
            let recs = client.recommendations().await?;
            if recs.is_empty() {
                println!("No recommendations right now.");
            }
            for rec in recs {
                println!("{}: {}", rec.name, rec.reason);
            }
        }
        Command::Weather {
            record_temp: Some(temp_c),
            condition: Some(condition),
            wind_kph,
            unsuitable,
        } => {
            let report = client
                .record_weather(&WeatherUpdate {
                    temp_c,
                    condition,
                    wind_kph,
                    humidity: None,
                    vis_km: None,
                    suitable_for_outdoor: !unsuitable,
                })
                .await?;
            println!("Recorded {} at {}", report.current.condition.text, report.current.recorded_at);
        }
        Command::Weather { .. } => match client.weather().await? {
            Some(report) => {
                let w = report.current;
                println!("{:.1}°C, {}", w.temp_c, w.condition.text);
                if let Some(wind) = w.wind_kph {
                    println!("Wind: {:.0} kph", wind);
                }
                println!(
                    "Outdoor activities: {}",
                    if w.suitable_for_outdoor { "yes" } else { "no" }
                );
            }
            None => println!("No weather data yet."),
        },
        Command::CheckIn {
            user,
            activity,
            party_size,
            facility,
            trail,
            notes,
            lat,
            lon,
        } => {
            let request = CheckInRequest {
                user_name: Some(user),
                activity_type: Some(activity),
                party_size: Some(party_size),
                notes,
                facility_id: facility,
                trail_id: trail,
                checkin_location: lat.zip(lon).map(|(lat, lon)| GeoPoint::new(lat, lon)),
            };
            let receipt = client.check_in(&request).await?;
            println!("{} (check-in #{})", receipt.message, receipt.checkin_id);
        }
        Command::Checkout { checkin_id } => {
            let receipt = client.checkout(checkin_id).await?;
            println!(
                "{} at {}",
                receipt.message,
                receipt.checkout_time.with_timezone(&chrono::Local).format("%H:%M")
            );
        }
        Command::History { user } => {
            for entry in client.history(&user).await? {
                let status = match entry.checkout_time {
                    Some(_) => "done",
                    None => "open",
                };
                println!(
                    "#{:<5} {:<24} {:<14} x{:<3} {} [{}]",
                    entry.checkin_id,
                    entry.place(),
                    entry.activity_type,
                    entry.party_size,
                    entry.checkin_time.format("%Y-%m-%d %H:%M"),
                    status
                );
            }
        }
    }

    Ok(())
}

fn level_label(level: OccupancyLevel) -> &'static str {
    match level {
        OccupancyLevel::Comfortable => "comfortable",
        OccupancyLevel::Busy => "busy",
        OccupancyLevel::Crowded => "crowded",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check_in() {
        let args = Args::try_parse_from([
            "park", "check-in", "--user", "casey", "--activity", "tennis", "--facility", "2",
            "--party-size", "4",
        ])
        .unwrap();
        match args.command {
            Command::CheckIn {
                facility, trail, party_size, ..
            } => {
                assert_eq!(facility, Some(2));
                assert_eq!(trail, None);
                assert_eq!(party_size, 4);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_facility_and_trail_conflict() {
        let result = Args::try_parse_from([
            "park", "check-in", "--user", "casey", "--activity", "walk", "--facility", "1",
            "--trail", "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_longitude_accepted() {
        let args =
            Args::try_parse_from(["park", "amenities", "--lat", "40.1", "--lon", "-85.7"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Amenities { lat: Some(_), lon: Some(_), .. }
        ));
    }

    #[test]
    fn test_trail_difficulty_parsed() {
        let args = Args::try_parse_from(["park", "trails", "--difficulty", "moderate"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Trails { difficulty: Some(Difficulty::Moderate) }
        ));
    }
}
