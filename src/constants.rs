/// Base URL for the Bitbucket Cloud REST API
pub const BASE_URL: &str = "https://api.bitbucket.org/";
/// OAuth2 token endpoint used for the client-credentials grant
pub const TOKEN_URL: &str = "https://bitbucket.org/site/oauth2/access_token";
/// User agent string used in HTTP requests to identify this client
pub const USER_AGENT: &str = "bitbucket-client/0.2.0";
/// Default timeout in seconds for REST API requests
pub const DEFAULT_TIMEOUT: u64 = 30;
/// Number of pipeline runs per page in the Bitbucket pipelines listing
pub const PIPELINES_PAGE_SIZE: u64 = 10;
