//! Input form: the mode switcher and packaging of the active input.

use std::path::Path;

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use shared::{
    domain::InputMode,
    protocol::{FILE_FIELD, TEXT_FIELD},
};
use thiserror::Error;

use crate::error::ServiceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInput {
    pub filename: String,
    pub content: Vec<u8>,
}

impl FileInput {
    pub fn new(filename: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content,
        }
    }

    pub fn read(path: &Path) -> Result<Self> {
        let content =
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .with_context(|| format!("{} has no file name", path.display()))?;
        Ok(Self { filename, content })
    }
}

/// One submission's payload, built fresh from the form each time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRequest {
    FileUpload { content: Vec<u8>, filename: String },
    TextContent { value: String },
}

impl AnalysisRequest {
    pub fn mode(&self) -> InputMode {
        match self {
            Self::FileUpload { .. } => InputMode::File,
            Self::TextContent { .. } => InputMode::Text,
        }
    }

    pub fn into_multipart(self) -> Result<Form, ServiceError> {
        match self {
            Self::FileUpload { content, filename } => {
                let mime = mime_guess::from_path(&filename).first_or_octet_stream();
                let part = Part::bytes(content)
                    .file_name(filename)
                    .mime_str(mime.essence_str())
                    .map_err(ServiceError::from)?;
                Ok(Form::new().part(FILE_FIELD, part))
            }
            Self::TextContent { value } => Ok(Form::new().text(TEXT_FIELD, value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Select a file to analyze.")]
    MissingFile,
    #[error("Paste some text to analyze.")]
    EmptyText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabIndicator {
    Active,
    Inactive,
}

/// File and text regions. Exactly one is eligible for submission at a time;
/// the inactive region keeps its contents so switching back restores them.
#[derive(Debug, Clone, Default)]
pub struct InputForm {
    mode: InputMode,
    file: Option<FileInput>,
    text: String,
}

impl InputForm {
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Returns whether the active mode changed.
    pub fn set_mode(&mut self, mode: InputMode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }

    pub fn is_region_active(&self, mode: InputMode) -> bool {
        self.mode == mode
    }

    pub fn tab_indicator(&self, mode: InputMode) -> TabIndicator {
        if self.is_region_active(mode) {
            TabIndicator::Active
        } else {
            TabIndicator::Inactive
        }
    }

    pub fn set_file(&mut self, file: FileInput) {
        self.file = Some(file);
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn eligible_request(&self) -> Result<AnalysisRequest, InputError> {
        match self.mode {
            InputMode::File => {
                let file = self.file.as_ref().ok_or(InputError::MissingFile)?;
                Ok(AnalysisRequest::FileUpload {
                    content: file.content.clone(),
                    filename: file.filename.clone(),
                })
            }
            InputMode::Text if self.text.trim().is_empty() => Err(InputError::EmptyText),
            InputMode::Text => Ok(AnalysisRequest::TextContent {
                value: self.text.clone(),
            }),
        }
    }
}
