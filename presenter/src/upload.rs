//! File upload followed by analysis, and the progress bar that tracks it.

use crate::backend::{Backend, UploadFile};
use crate::config::DashboardConfig;
use crate::error::DashboardError;
use common::model::analysis::AnalysisResult;
use common::requests::AnalyzeRequest;

/// Delay before the finished progress bar hides, in milliseconds.
pub const PROGRESS_HIDE_DELAY_MS: u32 = 500;
/// Delay before the dashboard switches to the finished analysis.
pub const VIEW_SWITCH_DELAY_MS: u32 = 800;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UploadStage {
    #[default]
    Idle,
    Uploading,
    Analyzing,
    Complete,
}

impl UploadStage {
    pub fn percent(self) -> u8 {
        match self {
            UploadStage::Idle | UploadStage::Uploading => 0,
            UploadStage::Analyzing => 50,
            UploadStage::Complete => 100,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UploadStage::Idle => "",
            UploadStage::Uploading => "Uploading file...",
            UploadStage::Analyzing => "Analyzing data...",
            UploadStage::Complete => "Complete!",
        }
    }

    pub fn is_visible(self) -> bool {
        self != UploadStage::Idle
    }
}

/// Rejects files over the configured size limit before any request is made.
pub fn validate_size(size: u64, config: &DashboardConfig) -> Result<(), DashboardError> {
    if size > config.max_upload_bytes {
        return Err(DashboardError::FileTooLarge {
            size,
            limit_mb: config.max_upload_mb(),
        });
    }
    Ok(())
}

/// Drag-and-drop accepts `.csv` files only; the file picker filters itself.
pub fn validate_dropped(name: &str) -> Result<(), DashboardError> {
    if name.to_ascii_lowercase().ends_with(".csv") {
        Ok(())
    } else {
        Err(DashboardError::NotCsv)
    }
}

/// Uploads `file` and returns the server's file id.
pub async fn upload_file(
    backend: &dyn Backend,
    file: &UploadFile,
    config: &DashboardConfig,
) -> Result<String, DashboardError> {
    validate_size(file.size(), config)?;
    log::info!("uploading {} ({} bytes)", file.name, file.size());

    let response = backend
        .upload(file)
        .await
        .map_err(|err| DashboardError::Upload(err.into_message()))?;
    match response.file_id {
        Some(file_id) if response.success => Ok(file_id),
        _ => Err(DashboardError::Upload(
            response.message.unwrap_or_else(|| "Upload failed".to_string()),
        )),
    }
}

/// Runs the analysis of an uploaded file.
pub async fn run_analysis(
    backend: &dyn Backend,
    file_id: &str,
) -> Result<AnalysisResult, DashboardError> {
    let request = AnalyzeRequest {
        file_id: file_id.to_string(),
    };
    let response = backend
        .analyze(&request)
        .await
        .map_err(|err| DashboardError::Analysis(err.into_message()))?;
    match response.data {
        Some(result) if response.success => {
            log::info!(
                "analysis of {} finished with score {}",
                result.filename,
                result.quality_score
            );
            Ok(result)
        }
        _ => Err(DashboardError::Analysis(
            response.message.unwrap_or_else(|| "Analysis failed".to_string()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_map_to_progress() {
        assert_eq!(UploadStage::Uploading.percent(), 0);
        assert_eq!(UploadStage::Uploading.label(), "Uploading file...");
        assert_eq!(UploadStage::Analyzing.percent(), 50);
        assert_eq!(UploadStage::Complete.label(), "Complete!");
        assert!(!UploadStage::Idle.is_visible());
    }

    #[test]
    fn oversized_file_is_rejected() {
        let config = DashboardConfig::default();
        let err = validate_size(config.max_upload_bytes + 1, &config).unwrap_err();
        assert_eq!(err.to_string(), "File size exceeds 50MB limit");
        assert!(validate_size(config.max_upload_bytes, &config).is_ok());
    }

    #[test]
    fn drop_accepts_csv_only() {
        assert!(validate_dropped("Patients.CSV").is_ok());
        assert_eq!(validate_dropped("notes.txt"), Err(DashboardError::NotCsv));
    }
}
