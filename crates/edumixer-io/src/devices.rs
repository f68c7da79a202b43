//! Output device discovery.

use cpal::traits::{DeviceTrait, HostTrait};
use cpal::{Device, Host};

use crate::{Error, Result};

/// Extract device name via `description()` (cpal 0.17+).
pub(crate) fn device_name(device: &Device) -> std::result::Result<String, cpal::DeviceNameError> {
    device.description().map(|d| d.name().to_string())
}

/// An output device as shown to users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDevice {
    /// Human-readable device name.
    pub name: String,
    /// Default sample rate in Hz.
    pub default_sample_rate: u32,
    /// Whether this is the host's default output.
    pub is_default: bool,
}

/// Lists every output device on the default host.
pub fn list_output_devices() -> Result<Vec<OutputDevice>> {
    let host = cpal::default_host();
    let default_name = host
        .default_output_device()
        .and_then(|d| device_name(&d).ok());

    let outputs = host
        .output_devices()
        .map_err(|e| Error::Stream(e.to_string()))?;

    let mut devices = Vec::new();
    for device in outputs {
        let Ok(name) = device_name(&device) else {
            continue;
        };
        let default_sample_rate = device
            .default_output_config()
            .map(|c| c.sample_rate())
            .unwrap_or(48000);
        let is_default = default_name.as_deref() == Some(name.as_str());
        devices.push(OutputDevice {
            name,
            default_sample_rate,
            is_default,
        });
    }
    Ok(devices)
}

/// The host's default output device, if any.
pub fn default_output_device() -> Result<Option<OutputDevice>> {
    let host = cpal::default_host();
    Ok(host.default_output_device().and_then(|d| {
        device_name(&d).ok().map(|name| OutputDevice {
            name,
            default_sample_rate: d
                .default_output_config()
                .map(|c| c.sample_rate())
                .unwrap_or(48000),
            is_default: true,
        })
    }))
}

/// Finds an output device whose name contains `search` (case-insensitive),
/// or the default device when `search` is `None`.
pub fn find_output_device(host: &Host, search: Option<&str>) -> Result<Device> {
    let Some(search) = search else {
        return host.default_output_device().ok_or(Error::NoDevice);
    };
    let search_lower = search.to_lowercase();
    let devices = host
        .output_devices()
        .map_err(|e| Error::Stream(e.to_string()))?;
    for device in devices {
        if let Ok(name) = device_name(&device)
            && name.to_lowercase().contains(&search_lower)
        {
            return Ok(device);
        }
    }
    Err(Error::DeviceNotFound(format!(
        "no output device matching '{}'",
        search
    )))
}
