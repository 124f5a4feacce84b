mod status_api;
