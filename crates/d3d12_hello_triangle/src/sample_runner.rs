use tracing::error;
use tracing::info;
use tracing::warn;
use windows::core::*;
use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Dxgi::*;
use windows::Win32::System::LibraryLoader::*;
use windows::Win32::UI::WindowsAndMessaging::*;

use crate::command_line::build_command_line;
use crate::dx_sample::DXSample;
use crate::windy_error::MyResult;

/// Runs a DirectX sample that implements the DXSample trait
pub fn run_sample<S>() -> MyResult<()>
where
    S: DXSample,
{
    let instance = unsafe { GetModuleHandleA(None)? };

    let wc = WNDCLASSEXA {
        cbSize: std::mem::size_of::<WNDCLASSEXA>() as u32,
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(wndproc::<S>),
        hInstance: instance.into(),
        hCursor: unsafe { LoadCursorW(None, IDC_ARROW)? },
        lpszClassName: s!("RustWindowClass"),
        ..Default::default()
    };

    let command_line = build_command_line();
    info!(
        warp = command_line.use_warp_device,
        frames_in_flight = command_line.frames_in_flight,
        "starting sample"
    );
    let (sample, info_queue) = S::new(&command_line)?;
    // The window procedure keeps a raw pointer to the sample, so it must not move.
    let mut sample = Box::new(sample);

    let size = sample.window_size();

    let atom = unsafe { RegisterClassExA(&wc) };
    if atom == 0 {
        return Err(Error::from_win32().into());
    }

    let mut window_rect = RECT {
        left: 0,
        top: 0,
        right: size.0,
        bottom: size.1,
    };
    unsafe { AdjustWindowRect(&mut window_rect, WS_OVERLAPPEDWINDOW, false)? };

    let mut title = sample.title();
    if command_line.use_warp_device {
        title.push_str(" (WARP)");
    }
    title.push('\0');

    let sample_ptr: *mut S = &mut *sample;
    let hwnd = unsafe {
        CreateWindowExA(
            WINDOW_EX_STYLE::default(),
            s!("RustWindowClass"),
            PCSTR(title.as_ptr()),
            WS_OVERLAPPEDWINDOW,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            window_rect.right - window_rect.left,
            window_rect.bottom - window_rect.top,
            None,
            None,
            Some(instance.into()),
            Some(sample_ptr as _),
        )
    }?;

    if let Err(e) = sample.bind_to_window(&hwnd) {
        print_dxgi_debug_messages(&info_queue);
        unsafe { _ = DestroyWindow(hwnd) };
        return Err(e);
    }

    unsafe { _ = ShowWindow(hwnd, SW_SHOW) };

    let mut outcome = Ok(());
    let mut done = false;
    while !done {
        let mut message = MSG::default();
        if unsafe { PeekMessageA(&mut message, None, 0, 0, PM_REMOVE) }.into() {
            unsafe {
                _ = TranslateMessage(&message);
                DispatchMessageA(&message);
            }
            if message.message == WM_QUIT {
                done = true;
            }
        } else {
            sample.update();
            if let Err(e) = sample.render() {
                error!("render failed: {e}");
                print_dxgi_debug_messages(&info_queue);
                outcome = Err(e);
                done = true;
            }
        }
    }

    sample.on_destroy();
    if outcome.is_err() {
        unsafe { _ = DestroyWindow(hwnd) };
    }
    outcome
}

/// Prints DXGI debug messages from the info queue
pub fn print_dxgi_debug_messages(info_queue: &Option<IDXGIInfoQueue>) {
    let Some(queue) = info_queue else {
        warn!("--- DXGI Info Queue not available ---");
        return;
    };

    warn!("--- DXGI Debug Messages START ---");
    let num_messages = unsafe { queue.GetNumStoredMessages(DXGI_DEBUG_ALL) };

    for i in 0..num_messages {
        let mut message_size: usize = 0;
        if unsafe { queue.GetMessage(DXGI_DEBUG_ALL, i, None, &mut message_size) }.is_err() {
            warn!("Error getting size for message {}", i);
            continue;
        }

        // u64 backing keeps the message header aligned.
        let mut message_buffer: Vec<u64> = vec![0; message_size.div_ceil(8)];
        let p_message = message_buffer.as_mut_ptr() as *mut DXGI_INFO_QUEUE_MESSAGE;

        if unsafe { queue.GetMessage(DXGI_DEBUG_ALL, i, Some(p_message), &mut message_size) }
            .is_err()
        {
            warn!("Error getting message data for message {}", i);
            continue;
        }

        let message = unsafe { &*p_message };
        let description = unsafe {
            std::slice::from_raw_parts(message.pDescription as *const u8, message.DescriptionByteLength)
        };
        let description = String::from_utf8_lossy(description)
            .trim_end_matches('\0')
            .trim()
            .to_string();

        let severity = match message.Severity {
            DXGI_INFO_QUEUE_MESSAGE_SEVERITY_CORRUPTION => "CORRUPTION",
            DXGI_INFO_QUEUE_MESSAGE_SEVERITY_ERROR => "ERROR",
            DXGI_INFO_QUEUE_MESSAGE_SEVERITY_WARNING => "WARNING",
            DXGI_INFO_QUEUE_MESSAGE_SEVERITY_INFO => "INFO",
            DXGI_INFO_QUEUE_MESSAGE_SEVERITY_MESSAGE => "MESSAGE",
            _ => "UNKNOWN",
        };

        warn!("DXGI Debug [{} ID:{}]: {}", severity, message.ID, description);
    }
    unsafe { queue.ClearStoredMessages(DXGI_DEBUG_ALL) };
    warn!("--- DXGI Debug Messages END ---");
}

fn sample_wndproc<S: DXSample>(sample: &mut S, message: u32, wparam: WPARAM) -> bool {
    match message {
        WM_KEYDOWN => {
            sample.on_key_down(wparam.0 as u8);
            true
        }
        WM_KEYUP => {
            sample.on_key_up(wparam.0 as u8);
            true
        }
        // Painting happens in the idle branch of the message loop.
        _ => false,
    }
}

extern "system" fn wndproc<S: DXSample>(
    window: HWND,
    message: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if message == WM_CREATE {
        unsafe {
            let create_struct: &CREATESTRUCTA = &*(lparam.0 as *const CREATESTRUCTA);
            SetWindowLongPtrA(window, GWLP_USERDATA, create_struct.lpCreateParams as _);
        }
        return LRESULT(0);
    }

    let user_data = unsafe { GetWindowLongPtrA(window, GWLP_USERDATA) };
    if user_data == 0 {
        // We can get messages before WM_CREATE or after WM_DESTROY.
        return unsafe { DefWindowProcA(window, message, wparam, lparam) };
    }

    // Safety: user_data is the boxed sample owned by run_sample, which outlives the window.
    let sample = unsafe { &mut *(user_data as *mut S) };

    let handled = match message {
        WM_DESTROY => {
            unsafe {
                SetWindowLongPtrA(window, GWLP_USERDATA, 0);
                PostQuitMessage(0);
            }
            true
        }
        _ => sample_wndproc(sample, message, wparam),
    };

    if handled {
        LRESULT(0)
    } else {
        unsafe { DefWindowProcA(window, message, wparam, lparam) }
    }
}
