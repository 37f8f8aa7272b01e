//! City generation
//!
//! Prices are grown by a smoothing recurrence over a padded scratch field so
//! that neighboring homes cost about the same, then pushed toward the cheap
//! and expensive ends. Occupancy is rolled independently per cell.

use rand::Rng;

use crate::city::home::Home;
use crate::core::config::CityConfig;
use crate::core::error::ConfigError;
use crate::core::types::{AgentId, Religion};
use crate::entity::agent::{Agent, Landmark};
use crate::spatial::grid::Grid;

/// Rows/columns of scaffolding on every side of the price field
pub const PRICE_PADDING: usize = 2;

/// Previously generated cells averaged into each interior price, as (dx, dy)
const SMOOTHING_OFFSETS: [(isize, isize); 6] = [(0, -1), (0, -2), (-1, 0), (-2, 0), (-1, 1), (-2, 1)];

/// Generate the initial city. Only the `width × height` interior is returned.
pub fn generate_city<R: Rng + ?Sized>(
    config: &CityConfig,
    rng: &mut R,
) -> Result<Grid<Home>, ConfigError> {
    config.validate()?;

    let prices = generate_price_field(config, rng);
    let mut city = Grid::filled(config.width, config.height, Home::empty(0.0));
    let mut next_id = 0u32;

    for x in 0..config.width {
        for y in 0..config.height {
            let price = *prices
                .get(x + PRICE_PADDING, y + PRICE_PADDING)
                .unwrap_or(&0.0);

            let mut empty = rng.gen_bool(config.empty_ratio);
            let landmark = rng.gen_bool(config.landmark_ratio);
            if landmark {
                empty = false;
            }

            // Resident attributes are drawn for every cell so the random
            // stream does not depend on how the cell ends up being used
            let ethnicity: bool = rng.gen();
            let religion: Religion = rng.gen();
            let income = rng.gen_range(config.min_income..=config.max_income);

            let home = if landmark {
                Home::with_landmark(price, Landmark::new(rng.gen()))
            } else if empty {
                Home::empty(price)
            } else {
                let agent = Agent::new(AgentId(next_id), religion, ethnicity, income);
                next_id += 1;
                Home::with_agent(price, agent)
            };
            city.set(x, y, home);
        }
    }

    tracing::debug!(
        "Generated {}x{} city with {} agents",
        config.width,
        config.height,
        next_id
    );

    Ok(city)
}

/// Price scratch field covering `[-2, W+2) × [-2, H+2)`, stored with a
/// `PRICE_PADDING` offset
pub fn generate_price_field<R: Rng + ?Sized>(config: &CityConfig, rng: &mut R) -> Grid<f64> {
    let padded_w = config.width + 2 * PRICE_PADDING;
    let padded_h = config.height + 2 * PRICE_PADDING;
    let mut field = Grid::filled(padded_w, padded_h, 0.0);

    let noise = config.price_noise * config.max_price;

    for px in 0..padded_w {
        for py in 0..padded_h {
            let interior = (PRICE_PADDING..PRICE_PADDING + config.width).contains(&px)
                && (PRICE_PADDING..PRICE_PADDING + config.height).contains(&py);

            let price = if interior {
                let mean = SMOOTHING_OFFSETS
                    .iter()
                    .map(|&(dx, dy)| {
                        let nx = px.wrapping_add_signed(dx);
                        let ny = py.wrapping_add_signed(dy);
                        *field.get(nx, ny).unwrap_or(&0.0)
                    })
                    .sum::<f64>()
                    / SMOOTHING_OFFSETS.len() as f64;
                let noisy = mean + rng.gen_range(-noise..=noise);
                noisy.clamp(0.0, config.max_price)
            } else {
                rng.gen_range(config.min_price..=config.max_price)
            };

            field.set(px, py, segregate_price(price, config));
        }
    }

    field
}

/// Pull a price toward whichever end of `[0, max_price]` it is closer to
pub fn segregate_price(price: f64, config: &CityConfig) -> f64 {
    let s = config.price_segregation;
    if price < config.max_price / 2.0 {
        price / (1.0 + s)
    } else {
        (price + config.max_price * s) / (1.0 + s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn small_config() -> CityConfig {
        CityConfig {
            width: 12,
            height: 9,
            ..CityConfig::default()
        }
    }

    #[test]
    fn test_grid_has_interior_dimensions() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let city = generate_city(&small_config(), &mut rng).unwrap();
        assert_eq!(city.width, 12);
        assert_eq!(city.height, 9);
        assert_eq!(city.len(), 108);
    }

    #[test]
    fn test_prices_within_bounds() {
        let config = CityConfig {
            price_noise: 0.5,
            ..small_config()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let city = generate_city(&config, &mut rng).unwrap();
        for (_, home) in city.iter() {
            assert!(home.price >= 0.0 && home.price <= config.max_price);
        }
    }

    #[test]
    fn test_segregation_pull() {
        let config = CityConfig {
            max_price: 100.0,
            price_segregation: 1.0,
            ..CityConfig::default()
        };
        assert_eq!(segregate_price(40.0, &config), 20.0);
        assert_eq!(segregate_price(60.0, &config), 80.0);
        assert_eq!(segregate_price(100.0, &config), 100.0);
        assert_eq!(segregate_price(0.0, &config), 0.0);
    }

    #[test]
    fn test_agent_ids_unique_and_sequential() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let city = generate_city(&small_config(), &mut rng).unwrap();
        let ids: Vec<u32> = city.cells().iter().filter_map(|h| h.agent()).map(|a| a.id.0).collect();
        let expected: Vec<u32> = (0..ids.len() as u32).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_landmark_ratio_one_fills_city_with_landmarks() {
        let config = CityConfig {
            landmark_ratio: 1.0,
            empty_ratio: 1.0,
            ..small_config()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let city = generate_city(&config, &mut rng).unwrap();
        assert!(city.cells().iter().all(Home::is_landmark));
    }

    #[test]
    fn test_same_seed_same_city() {
        let config = small_config();
        let a = generate_city(&config, &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
        let b = generate_city(&config, &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_noise_smooths_prices() {
        // With no noise and no pull every interior price is a mean of earlier
        // prices, so it stays inside the padding's price range
        let config = CityConfig {
            min_price: 40_000.0,
            max_price: 60_000.0,
            price_noise: 0.0,
            price_segregation: 0.0,
            ..small_config()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let field = generate_price_field(&config, &mut rng);
        for (_, price) in field.iter() {
            assert!(*price >= 40_000.0 && *price <= 60_000.0);
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = CityConfig {
            height: 0,
            ..CityConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(generate_city(&config, &mut rng).is_err());
    }
}
