use crate::core::{Place, ReferenceData, Storage};
use crate::utils::error::{Result, SeederError};
use serde::de::DeserializeOwned;

impl ReferenceData {
    /// 透過 Storage 載入三份參考資料；任何一份讀不到、格式錯誤或是空的都直接失敗
    pub async fn load<S: Storage>(
        storage: &S,
        places_file: &str,
        industries_file: &str,
        kinds_file: &str,
    ) -> Result<Self> {
        let places: Vec<Place> = load_list(storage, places_file).await?;
        let industries: Vec<String> = load_list(storage, industries_file).await?;
        let kinds: Vec<String> = load_list(storage, kinds_file).await?;

        tracing::info!(
            "📂 Loaded {} places, {} industries, {} kinds",
            places.len(),
            industries.len(),
            kinds.len()
        );

        Ok(Self {
            places,
            industries,
            kinds,
        })
    }
}

async fn load_list<S: Storage, T: DeserializeOwned>(storage: &S, file: &str) -> Result<Vec<T>> {
    tracing::debug!("Reading reference file: {}", file);
    let bytes = storage.read_file(file).await?;

    let items: Vec<T> =
        serde_json::from_slice(&bytes).map_err(|e| SeederError::ReferenceDataError {
            file: file.to_string(),
            message: e.to_string(),
        })?;

    if items.is_empty() {
        return Err(SeederError::EmptyReferenceData {
            file: file.to_string(),
        });
    }

    Ok(items)
}
