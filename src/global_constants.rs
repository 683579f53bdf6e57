pub const APPLICATION_NAME: &str = "Cloud OCR Demo";
pub const APPLICATION_DIR_NAME: &str = "cloud-ocr-demo";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

pub const LOG_TAG_APP: &str = "[APP]";
pub const LOG_TAG_SESSION: &str = "[SESSION]";
pub const LOG_TAG_IMAGE_SOURCE: &str = "[IMAGE_SOURCE]";
pub const LOG_TAG_SELECTED_IMAGE: &str = "[SELECTED_IMAGE]";
pub const LOG_TAG_ENCODER: &str = "[ENCODER]";
pub const LOG_TAG_REQUEST: &str = "[REQUEST]";
pub const LOG_TAG_ANNOTATION: &str = "[ANNOTATION]";
pub const LOG_TAG_WORKFLOW: &str = "[WORKFLOW]";
pub const LOG_TAG_RUNTIME: &str = "[RUNTIME]";
pub const LOG_TAG_FIREBASE_AUTH: &str = "[FIREBASE_AUTH]";
pub const LOG_TAG_FIREBASE_FUNCTIONS: &str = "[FIREBASE_FUNCTIONS]";
pub const LOG_TAG_TERMINAL: &str = "[TERMINAL]";
pub const LOG_TAG_SETTINGS: &str = "[SETTINGS]";

pub const NOTICE_SIGN_IN_SUCCESS: &str = "Sign in success.";
pub const NOTICE_AUTHENTICATION_FAILED: &str = "Authentication failed.";
pub const NOTICE_ANNOTATION_COMPLETE: &str = "Annotation complete!";
pub const NOTICE_TASK_FAILED: &str = "Task failed.";
pub const NOTICE_SIGNED_OUT: &str = "Signed out.";
pub const NOTICE_IMAGE_LOAD_FAILED: &str = "Could not load image.";
pub const NOTICE_SUBMISSION_IN_FLIGHT: &str = "Annotation already in progress.";
pub const NOTICE_NO_IMAGE_SELECTED: &str = "Load a picture first.";

pub const FAILURE_TASK_FAILED: &str = "task failed";
pub const FAILURE_AUTHENTICATION_FAILED: &str = "authentication failed";

pub const DEFAULT_AUTH_BASE_URL: &str = "https://identitytoolkit.googleapis.com";
pub const DEFAULT_FUNCTIONS_BASE_URL: &str = "https://us-central1-cloud-ocr-demo.cloudfunctions.net";
pub const DEFAULT_ANNOTATE_FUNCTION: &str = "annotateImage";
pub const DEFAULT_DEMO_EMAIL: &str = "testuser@test.com";
pub const DEFAULT_DEMO_PASSWORD: &str = "testOCRAccount";

pub const DEFAULT_TARGET_WIDTH: u32 = 1024;
pub const DEFAULT_TARGET_HEIGHT: u32 = 768;
pub const DEFAULT_JPEG_QUALITY: u8 = 100;

pub const ENGLISH_HINT_CODE: &str = "en";
pub const HANDWRITTEN_HINT_CODE: &str = "handwrit";

pub const PICKER_PROMPT: &str = "image path (blank to cancel)> ";
pub const COMMAND_PROMPT: &str = "> ";

pub const STARTUP_BANNER: &str = r#"
╔════════════════════════════════════════════════════════╗
║  Cloud OCR Demo                                        ║
║                                                        ║
║  load                 pick a picture                   ║
║  english on|off       toggle the English hint          ║
║  handwritten on|off   toggle the handwriting hint      ║
║  annotate             send the picture for OCR         ║
║  status | signout | quit                               ║
║                                                        ║
╚════════════════════════════════════════════════════════╝
"#;
