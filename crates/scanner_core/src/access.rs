/// Camera authorization as reported by the operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraAuthorization {
    NotDetermined,
    Authorized,
    Denied,
    Restricted,
}

/// Raw platform answer to "can this device scan barcodes?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformCameraStatus {
    pub camera_present: bool,
    pub authorization: CameraAuthorization,
    pub scanner_supported: bool,
}

/// Whether the scanner can run, derived from [`PlatformCameraStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScannerAccess {
    #[default]
    Unknown,
    Unavailable,
    Denied,
    Available,
}

impl ScannerAccess {
    pub fn from_platform(status: PlatformCameraStatus) -> Self {
        if !status.camera_present {
            return ScannerAccess::Unavailable;
        }
        match status.authorization {
            CameraAuthorization::Authorized if status.scanner_supported => {
                ScannerAccess::Available
            }
            CameraAuthorization::Authorized => ScannerAccess::Unavailable,
            CameraAuthorization::Denied | CameraAuthorization::Restricted => {
                ScannerAccess::Denied
            }
            // The host still has to ask the user; it reports again afterwards.
            CameraAuthorization::NotDetermined => ScannerAccess::Unknown,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            ScannerAccess::Unknown => "Requesting camera access",
            ScannerAccess::Unavailable => "This device cannot scan barcodes",
            ScannerAccess::Denied => "Please provide access to the camera in settings",
            ScannerAccess::Available => "Scanner ready",
        }
    }
}
