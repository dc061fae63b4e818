use crate::core::{DeviceRecord, Place, ReferenceData};
use crate::utils::error::{Result, SeederError};
use rand::seq::SliceRandom;
use rand::Rng;

pub const IMEI_MIN: u64 = 1;
pub const IMEI_MAX: u64 = 999_999_999_999_999;

/// 座標偏移範圍 [JITTER_MIN, JITTER_MAX)，單位為度
pub const JITTER_MIN: f64 = 0.000_001;
pub const JITTER_MAX: f64 = 0.001;

/// 一次外層迴圈抽出的 (地點, 產業, 類型) 組合
#[derive(Debug, Clone, Copy)]
pub struct DeviceBatch<'a> {
    pub place: &'a Place,
    pub industry: &'a str,
    pub kind: &'a str,
}

impl<'a> DeviceBatch<'a> {
    /// 三項各自獨立、均勻、可重複地抽取
    pub fn draw<R: Rng + ?Sized>(reference: &'a ReferenceData, rng: &mut R) -> Result<Self> {
        let place = reference
            .places
            .choose(rng)
            .ok_or_else(|| empty("places"))?;
        let industry = reference
            .industries
            .choose(rng)
            .ok_or_else(|| empty("industries"))?;
        let kind = reference.kinds.choose(rng).ok_or_else(|| empty("kinds"))?;

        Ok(Self {
            place,
            industry,
            kind,
        })
    }

    pub fn device_name(&self, sequence: usize) -> String {
        format!(
            "{} {} {} {}",
            self.place.suburb, self.industry, self.kind, sequence
        )
    }

    pub fn device<R: Rng + ?Sized>(&self, sequence: usize, rng: &mut R) -> DeviceRecord {
        DeviceRecord {
            name: self.device_name(sequence),
            imei: random_imei(rng),
            // 緯度往南、經度往東偏移
            latitude: self.place.latitude - jitter(rng),
            longitude: self.place.longitude + jitter(rng),
        }
    }
}

fn empty(what: &str) -> SeederError {
    SeederError::EmptyReferenceData {
        file: what.to_string(),
    }
}

pub fn random_imei<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.gen_range(IMEI_MIN..=IMEI_MAX).to_string()
}

pub fn jitter<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(JITTER_MIN..JITTER_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn elizabeth() -> ReferenceData {
        ReferenceData {
            places: vec![Place {
                suburb: "Elizabeth".to_string(),
                latitude: -34.71,
                longitude: 138.67,
            }],
            industries: vec!["Manufacturing".to_string()],
            kinds: vec!["Sensor".to_string()],
        }
    }

    #[test]
    fn test_device_name_joins_with_single_spaces() {
        let reference = elizabeth();
        let mut rng = StdRng::seed_from_u64(7);
        let batch = DeviceBatch::draw(&reference, &mut rng).unwrap();

        assert_eq!(batch.device_name(0), "Elizabeth Manufacturing Sensor 0");
        assert_eq!(batch.device_name(9), "Elizabeth Manufacturing Sensor 9");
    }

    #[test]
    fn test_device_coordinates_stay_within_jitter() {
        let reference = elizabeth();
        let mut rng = StdRng::seed_from_u64(42);
        let batch = DeviceBatch::draw(&reference, &mut rng).unwrap();

        for seq in 0..1000 {
            let device = batch.device(seq % 10, &mut rng);
            assert!(device.latitude >= -34.71 - JITTER_MAX);
            assert!(device.latitude <= -34.71 - JITTER_MIN);
            assert!(device.longitude >= 138.67 + JITTER_MIN);
            assert!(device.longitude <= 138.67 + JITTER_MAX);
        }
    }

    #[test]
    fn test_imei_is_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let imei: u64 = random_imei(&mut rng).parse().unwrap();
            assert!((IMEI_MIN..=IMEI_MAX).contains(&imei));
        }
    }

    #[test]
    fn test_draw_covers_all_entries() {
        let reference = ReferenceData {
            places: elizabeth().places,
            industries: vec!["Manufacturing".to_string(), "Retail".to_string()],
            kinds: vec!["Sensor".to_string(), "Gateway".to_string()],
        };
        let mut rng = StdRng::seed_from_u64(3);

        let mut industries = std::collections::HashSet::new();
        let mut kinds = std::collections::HashSet::new();
        for _ in 0..200 {
            let batch = DeviceBatch::draw(&reference, &mut rng).unwrap();
            industries.insert(batch.industry.to_string());
            kinds.insert(batch.kind.to_string());
        }

        assert_eq!(industries.len(), 2);
        assert_eq!(kinds.len(), 2);
    }

    #[test]
    fn test_draw_from_empty_reference_fails() {
        let reference = ReferenceData {
            kinds: vec![],
            ..elizabeth()
        };
        let mut rng = StdRng::seed_from_u64(0);

        assert!(matches!(
            DeviceBatch::draw(&reference, &mut rng),
            Err(SeederError::EmptyReferenceData { .. })
        ));
    }
}
