mod console_layout;
pub use console_layout::ConsoleLayout;

mod login;
pub use login::Login;

mod sign_up;
pub use sign_up::SignUp;

mod dashboard;
pub use dashboard::Dashboard;

mod device_folders;
pub use device_folders::DeviceFolders;

mod not_found;
pub use not_found::NotFound;
