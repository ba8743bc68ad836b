// src/services/document_service.rs

use std::io::Cursor;

use image::{DynamicImage, ImageOutputFormat, Luma};
use qrcode::{render::svg, QrCode};

use crate::common::error::AppError;

/// Formatos do QR code do convite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrFormat {
    Png,
    Svg,
}

impl QrFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            QrFormat::Png => "image/png",
            QrFormat::Svg => "image/svg+xml",
        }
    }
}

/// Documentos gerados para a turma (hoje: o QR code do link de convite).
#[derive(Clone)]
pub struct DocumentService {
    public_base_url: String,
}

impl DocumentService {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        let mut public_base_url = public_base_url.into();
        while public_base_url.ends_with('/') {
            public_base_url.pop();
        }
        Self { public_base_url }
    }

    /// Link curto que os pais abrem (redireciona para o formulário).
    pub fn join_url(&self, invite_code: &str) -> String {
        format!("{}/join/{}", self.public_base_url, invite_code)
    }

    pub fn invite_qr(&self, invite_code: &str, format: QrFormat) -> Result<Vec<u8>, AppError> {
        let url = self.join_url(invite_code);
        let code = QrCode::new(url.as_bytes())
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        match format {
            QrFormat::Svg => {
                let svg = code
                    .render::<svg::Color>()
                    .min_dimensions(240, 240)
                    .build();
                Ok(svg.into_bytes())
            }
            QrFormat::Png => {
                let image_buffer = code.render::<Luma<u8>>().min_dimensions(240, 240).build();
                let dynamic_image = DynamicImage::ImageLuma8(image_buffer);

                let mut buffer = Cursor::new(Vec::new());
                dynamic_image
                    .write_to(&mut buffer, ImageOutputFormat::Png)
                    .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
                Ok(buffer.into_inner())
            }
        }
    }
}
